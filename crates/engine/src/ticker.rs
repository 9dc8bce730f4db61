//! Tick driver
//!
//! [`SharedGame`] is the single writer: every mutation, whether from the host
//! or from the timer, goes through one async mutex. [`TickDriver`] is a tokio
//! task that calls `advance` at the game's current tick interval and re-reads
//! the interval whenever the host dispatches an action.
//!
//! An unchanged interval keeps its schedule, so a stream of moves never
//! delays gravity. A new interval (fast drop toggled, game started or ended)
//! restarts the schedule from the moment of the change.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, MutexGuard, Notify};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use crate::core::{Game, GameSnapshot, PieceSource};
use crate::dispatch::dispatch;
use crate::types::GameAction;

/// A game behind an async mutex, plus a wake-up signal for the driver
#[derive(Debug)]
pub struct SharedGame<S> {
    game: Arc<Mutex<Game<S>>>,
    wake: Arc<Notify>,
}

impl<S> Clone for SharedGame<S> {
    fn clone(&self) -> Self {
        Self {
            game: Arc::clone(&self.game),
            wake: Arc::clone(&self.wake),
        }
    }
}

impl<S: PieceSource> SharedGame<S> {
    pub fn new(game: Game<S>) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Apply an action and wake the driver; returns true if state changed
    pub async fn dispatch(&self, action: GameAction) -> bool {
        let changed = {
            let mut game = self.game.lock().await;
            dispatch(&mut game, action)
        };
        self.wake.notify_one();
        changed
    }

    /// Run `f` against the current state
    pub async fn read<T>(&self, f: impl FnOnce(&Game<S>) -> T) -> T {
        let game = self.game.lock().await;
        f(&game)
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.read(|game| game.snapshot()).await
    }

    /// Direct access for hosts that batch several operations
    ///
    /// Call [`SharedGame::wake`] afterwards if the run state or fast-drop
    /// flag may have changed.
    pub async fn lock(&self) -> MutexGuard<'_, Game<S>> {
        self.game.lock().await
    }

    /// Ask the driver to re-read the tick interval
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    async fn advance(&self) {
        let outcome = self.game.lock().await.advance();
        trace!(?outcome, "tick");
    }
}

/// Background task advancing a [`SharedGame`]
#[derive(Debug)]
pub struct TickDriver {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TickDriver {
    /// Spawn the driver on the current tokio runtime
    pub fn spawn<S>(shared: SharedGame<S>) -> Self
    where
        S: PieceSource + Send + 'static,
    {
        let (shutdown, rx) = watch::channel(false);
        let handle = tokio::spawn(run(shared, rx));
        Self { shutdown, handle }
    }

    /// Stop the driver and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "tick driver task failed");
        }
    }
}

async fn run<S: PieceSource>(shared: SharedGame<S>, mut shutdown: watch::Receiver<bool>) {
    debug!("tick driver started");
    // (interval, next deadline) while the game is running
    let mut schedule: Option<(u32, Instant)> = None;

    loop {
        let interval = shared.read(|game| game.tick_interval_ms()).await;
        schedule = match (interval, schedule) {
            (None, _) => None,
            (Some(ms), Some((current, deadline))) if current == ms => Some((current, deadline)),
            (Some(ms), _) => Some((ms, Instant::now() + millis(ms))),
        };

        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = shared.wake.notified() => {}
            _ = sleep_until_opt(schedule.map(|(_, deadline)| deadline)) => {
                shared.advance().await;
                schedule = schedule.map(|(ms, deadline)| (ms, deadline + millis(ms)));
            }
        }
    }
    debug!("tick driver stopped");
}

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
