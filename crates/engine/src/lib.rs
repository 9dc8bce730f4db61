//! Engine facade - the entry points a host wires its events to
//!
//! - [`dispatch`]: applies one [`GameAction`] to a game, 1:1 with the game
//!   operations, safe to call in any state
//! - [`registry`]: a host-owned map of games keyed by session id
//! - [`ticker`]: a single-writer game handle and a tokio task that calls
//!   `advance` at the game's current tick interval
//!
//! The core crate never looks at a clock; everything time-related lives here.

pub mod dispatch;
pub mod registry;
pub mod ticker;

pub use fallblock_core as core;
pub use fallblock_types as types;

pub use dispatch::{dispatch, dispatch_all};
pub use registry::{GameRegistry, DEFAULT_SESSION};
pub use ticker::{SharedGame, TickDriver};

pub use fallblock_types::GameAction;
