//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared by the engine, the facade and any
//! presentation layer. Nothing here performs I/O or owns game logic.
//!
//! # Coordinates
//!
//! Board positions are `(row, col)` pairs:
//!
//! - **row** grows downward, row 0 is the top of the board
//! - **col** grows rightward, col 0 is the left edge
//!
//! Coordinates are signed so that a transformed piece may temporarily sit
//! outside the board before the collision check rejects it.
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 25 | Board height |
//! | `DEFAULT_COLS` | 10 | Board width |
//! | `MAX_CHEATS` | 3 | Cheats granted per game |
//! | `CHEAT_PENALTY` | 10 | Points taken by a successful cheat |
//! | `TICK_MS` | 300 | Advance interval |
//! | `FAST_TICK_MS` | 20 | Advance interval while fast-dropping |
//! | `ROW_CLEAR_POINTS` | 10 | Points per removed full row |
//! | `FAST_FALL_POINTS` | 1 | Points per fast-fall step |
//!
//! # Examples
//!
//! ```
//! use fallblock_types::{GameAction, PieceKind, DEFAULT_COLS};
//!
//! let kind = PieceKind::from_index(6).unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color_index(), 6);
//!
//! let action = GameAction::from_str("rotateLeft").unwrap();
//! assert_eq!(action, GameAction::RotateLeft);
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: usize = 25;

/// Default board width in columns
pub const DEFAULT_COLS: usize = 10;

/// Cheats available after each (re)start
pub const MAX_CHEATS: u32 = 3;

/// Score removed by a successful cheat (floored at zero)
pub const CHEAT_PENALTY: u32 = 10;

/// Normal advance interval in milliseconds
pub const TICK_MS: u32 = 300;

/// Advance interval while fast-drop is active
pub const FAST_TICK_MS: u32 = 20;

/// Points per full row removed when a piece settles
pub const ROW_CLEAR_POINTS: u32 = 10;

/// Points per successful downward step in fast-fall mode
pub const FAST_FALL_POINTS: u32 = 1;

/// Number of distinct piece shapes
pub const PIECE_KIND_COUNT: usize = 7;

/// The seven piece shapes, in color-index order
///
/// The discriminant is the color index written into board cells:
/// - **Square** (0): 2x2 block
/// - **I** (1): straight bar
/// - **L** (2): bar with a foot on the left
/// - **J** (3): bar with a foot on the right
/// - **Z** (4): the "2"-shaped skew piece
/// - **S** (5): the "S"-shaped skew piece
/// - **T** (6): T-junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Square = 0,
    I = 1,
    L = 2,
    J = 3,
    Z = 4,
    S = 5,
    T = 6,
}

impl PieceKind {
    /// All kinds in color-index order
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::Square,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Color index used for rendering settled blocks
    pub fn color_index(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its color index
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "o" => Some(PieceKind::Square),
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" | "2" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Square => "square",
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: filled by a block of that kind (its color index)
pub type Cell = Option<PieceKind>;

/// A board position, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A translation vector applied to every block of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translation {
    pub rows: i32,
    pub cols: i32,
}

impl Translation {
    pub const DOWN: Translation = Translation::new(1, 0);
    pub const LEFT: Translation = Translation::new(0, -1);
    pub const RIGHT: Translation = Translation::new(0, 1);

    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }
}

/// Axis-aligned bounding box of a piece
///
/// `bottom` and `right` are exclusive (one past the last occupied row/col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Shift the box by a translation
    pub fn translated(self, by: Translation) -> Self {
        Self {
            top: self.top + by.rows,
            left: self.left + by.cols,
            bottom: self.bottom + by.rows,
            right: self.right + by.cols,
        }
    }
}

/// Run state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Stopped,
    Running,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Stopped => "stopped",
            GameStatus::Running => "running",
        }
    }
}

/// Engine actions
///
/// Every external event (key press, click, timer tick) maps to exactly one of
/// these, and each maps 1:1 to a game operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Reset progress and (re)start the game
    StartGame,
    /// Freeze the game, keeping the board visible
    StopGame,
    /// Move the falling piece one column left
    MoveLeft,
    /// Move the falling piece one column right
    MoveRight,
    /// Rotate the falling piece counter-clockwise
    RotateLeft,
    /// Rotate the falling piece clockwise
    RotateRight,
    /// Timer tick: spawn, fall or settle
    Advance,
    /// Remove the bottom row at a score penalty
    Cheat,
    /// Enable or disable fast-drop
    SetFastDrop(bool),
}

impl GameAction {
    /// Parse a payload-free action from its camelCase name (case-insensitive)
    ///
    /// `SetFastDrop` carries a payload and is parsed from `"fastDropOn"` /
    /// `"fastDropOff"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("fastDropOn"), Some(GameAction::SetFastDrop(true)));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startgame" => Some(GameAction::StartGame),
            "stopgame" => Some(GameAction::StopGame),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "advance" => Some(GameAction::Advance),
            "cheat" => Some(GameAction::Cheat),
            "fastdropon" => Some(GameAction::SetFastDrop(true)),
            "fastdropoff" => Some(GameAction::SetFastDrop(false)),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::StartGame => "startGame",
            GameAction::StopGame => "stopGame",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::Advance => "advance",
            GameAction::Cheat => "cheat",
            GameAction::SetFastDrop(true) => "fastDropOn",
            GameAction::SetFastDrop(false) => "fastDropOff",
        }
    }

    /// Whether the action only has an effect while the game is running
    pub fn requires_running(&self) -> bool {
        !matches!(self, GameAction::StartGame | GameAction::StopGame)
    }
}
