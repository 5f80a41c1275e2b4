//! Session runtime - owns the state machine and its tick driver.
//!
//! Bridges the sync state machine with the async one-second timer. The
//! timer task is scoped to a game epoch: starting a new game (or hitting
//! game over) aborts the task, and any tick event still in flight from an
//! older epoch is discarded, so stale ticks can never mutate the current
//! run.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use sumstack_core::{GameSnapshot, GameState};
use sumstack_types::{GameMode, RowOutcome, SelectOutcome, TickOutcome, TileId};

use crate::observation::ObservationMessage;

/// Upper bound on queued, not-yet-applied ticks.
const MAX_PENDING_TICKS: usize = 4;

/// One-second timer event, tagged with the game epoch it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub epoch: u64,
}

/// A running game session.
///
/// Commands are applied synchronously; after every applied command the
/// session publishes a full [`ObservationMessage`] to the channel handed
/// out by [`Session::new`].
pub struct Session {
    rt: Runtime,
    state: Option<GameState>,
    epoch: u64,
    seq: u64,
    tick_task: Option<JoinHandle<()>>,
    tick_tx: mpsc::Sender<TickEvent>,
    tick_rx: mpsc::Receiver<TickEvent>,
    out_tx: mpsc::UnboundedSender<ObservationMessage>,
}

impl Session {
    /// Create an idle session plus the observation stream for the
    /// presentation layer.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<ObservationMessage>)> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (tick_tx, tick_rx) = mpsc::channel(MAX_PENDING_TICKS);
        let (out_tx, out_rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                rt,
                state: None,
                epoch: 0,
                seq: 0,
                tick_task: None,
                tick_tx,
                tick_rx,
                out_tx,
            },
            out_rx,
        ))
    }

    /// Start a new game, replacing any previous run. The old epoch's
    /// timer is aborted before the new state exists.
    pub fn start(&mut self, mode: GameMode, seed: u32) {
        self.install(GameState::new(mode, seed));
    }

    /// Start from an explicit state (restored snapshot, test fixture).
    pub fn restore(&mut self, state: GameState) {
        self.install(state);
    }

    fn install(&mut self, state: GameState) {
        self.cancel_timer();
        self.epoch += 1;
        self.drain_stale_ticks();

        let run_timer = state.mode() == GameMode::Time && !state.game_over();
        self.state = Some(state);
        if run_timer {
            self.spawn_timer();
        }
        self.publish();
    }

    /// Toggle a tile selection on the current game.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        let Some(state) = self.state.as_mut() else {
            return SelectOutcome::Ignored;
        };
        let outcome = state.select_tile(id);
        self.after_command();
        outcome
    }

    /// Inject a row into the current game.
    pub fn add_row(&mut self) -> RowOutcome {
        let Some(state) = self.state.as_mut() else {
            return RowOutcome::Ignored;
        };
        let outcome = state.add_row();
        self.after_command();
        outcome
    }

    /// Apply queued timer ticks. Call this from the driving loop; ticks
    /// from an older epoch are dropped without touching the state.
    pub fn pump(&mut self) {
        while let Ok(event) = self.tick_rx.try_recv() {
            self.apply_tick(event);
        }
    }

    /// Apply a single tick event, honoring the epoch boundary. Exposed
    /// for callers that drive their own timer.
    pub fn apply_tick(&mut self, event: TickEvent) -> TickOutcome {
        if event.epoch != self.epoch {
            return TickOutcome::Ignored;
        }
        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Ignored;
        };
        let outcome = state.tick_second();
        self.after_command();
        outcome
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    /// Whether the epoch timer task is currently running.
    pub fn timer_running(&self) -> bool {
        self.tick_task.is_some()
    }

    fn after_command(&mut self) {
        if self.state.as_ref().is_some_and(GameState::game_over) {
            self.cancel_timer();
        }
        self.publish();
    }

    fn spawn_timer(&mut self) {
        let tx = self.tick_tx.clone();
        let epoch = self.epoch;
        self.tick_task = Some(self.rt.spawn(run_ticker(tx, epoch)));
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            handle.abort();
        }
    }

    fn drain_stale_ticks(&mut self) {
        while self.tick_rx.try_recv().is_ok() {}
    }

    fn publish(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        self.seq += 1;
        let msg = ObservationMessage::new(self.seq, self.epoch, &state.snapshot());
        let _ = self.out_tx.send(msg);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// One-second tick loop feeding the session's tick channel. Runs until
/// the receiver is dropped or the task is aborted.
async fn run_ticker(tx: mpsc::Sender<TickEvent>, epoch: u64) {
    let mut ticker = interval(Duration::from_secs(1));
    // A burst after a stall must not compress the countdown.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; skip it.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if tx.send(TickEvent { epoch }).await.is_err() {
            break;
        }
    }
}
