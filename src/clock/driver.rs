//! Async driver that runs a `MatchEngine` in real time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::{CardId, Result};
use crate::engine::{EngineEvent, FlipOutcome, MatchEngine, ResolutionTicket, Session, TickOutcome};
use crate::profile::{GameSummary, ScoreRecorder};

struct DriverState {
    engine: MatchEngine,
    /// Cancelled when the session is restarted or ended.
    session_token: CancellationToken,
    /// Child of `session_token`; cancelled on pause.
    clock_token: CancellationToken,
    clock: Option<JoinHandle<()>>,
    recording: Option<JoinHandle<()>>,
}

/// Stands in for the caller's recorder inside the engine, handing each
/// summary to the recording task instead of writing under the driver lock.
struct ForwardingRecorder {
    summaries: UnboundedSender<GameSummary>,
}

impl ScoreRecorder for ForwardingRecorder {
    fn record(&mut self, summary: &GameSummary) {
        if self.summaries.send(summary.clone()).is_err() {
            warn!(score = summary.score, "recording task gone, score dropped");
        }
    }
}

/// Owns a `MatchEngine` and schedules its deferred work on tokio.
///
/// The driver runs two kinds of background task:
///
/// - **Clock**: ticks the engine once per `tick_interval` while the
///   session is live and unpaused
/// - **Resolution**: one per flipped pair, resolving it after
///   `resolve_delay`
///
/// Game-over summaries go to the engine's recorder from a separate task on
/// the blocking pool, so slow store I/O never holds the engine lock.
///
/// Every task is tied to the session it was spawned for. Restarting or
/// ending the game cancels them, and each checks the engine generation
/// before touching state, so nothing from an old session leaks into a new
/// one.
///
/// Must be created inside a tokio runtime.
pub struct SessionDriver {
    state: Arc<Mutex<DriverState>>,
    shutdown: CancellationToken,
}

impl SessionDriver {
    /// Take ownership of `engine` and start its clock.
    pub fn start(mut engine: MatchEngine) -> Self {
        let shutdown = CancellationToken::new();
        let session_token = shutdown.child_token();
        let clock_token = session_token.child_token();
        let runs_clock = !engine.session().is_over() && !engine.session().is_paused();

        let (sender, summaries) = unbounded_channel();
        let recorder = engine.replace_recorder(Box::new(ForwardingRecorder { summaries: sender }));
        let recording = spawn_recording(recorder, summaries, shutdown.clone());

        let driver = Self {
            state: Arc::new(Mutex::new(DriverState {
                engine,
                session_token,
                clock_token,
                clock: None,
                recording: Some(recording),
            })),
            shutdown,
        };

        if runs_clock {
            // Nobody else can hold the lock yet.
            if let Ok(mut state) = driver.state.try_lock() {
                let clock = driver.spawn_clock(&state);
                state.clock = Some(clock);
            }
        }
        driver
    }

    /// Flip a card, scheduling resolution if it completes a pair.
    pub async fn flip(&self, card_id: CardId) -> Result<FlipOutcome> {
        let mut state = self.state.lock().await;
        let outcome = state.engine.flip(card_id)?;

        if let Some(ticket) = outcome.ticket() {
            let delay = state.engine.config().resolve_delay();
            self.spawn_resolution(ticket, delay, state.session_token.clone());
        }
        Ok(outcome)
    }

    /// Pause the clock. Returns whether anything changed.
    pub async fn pause(&self) -> bool {
        let mut state = self.state.lock().await;
        if !state.engine.pause() {
            return false;
        }
        state.clock_token.cancel();
        state.clock = None;
        true
    }

    /// Resume the clock. Returns whether anything changed.
    pub async fn resume(&self) -> bool {
        let mut state = self.state.lock().await;
        if !state.engine.resume() {
            return false;
        }
        state.clock_token = state.session_token.child_token();
        let clock = self.spawn_clock(&state);
        state.clock = Some(clock);
        true
    }

    /// Discard the session and deal a new one.
    ///
    /// Outstanding resolutions and the old clock are cancelled.
    pub async fn restart(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.engine.restart()?;

        state.session_token.cancel();
        state.session_token = self.shutdown.child_token();
        state.clock_token = state.session_token.child_token();
        let clock = self.spawn_clock(&state);
        state.clock = Some(clock);
        Ok(())
    }

    /// End the session and stop its background work.
    pub async fn end_game(&self) -> Option<GameSummary> {
        let mut state = self.state.lock().await;
        let summary = state.engine.end_game();
        state.session_token.cancel();
        state.clock = None;
        summary
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.state.lock().await.engine.snapshot()
    }

    /// Events emitted since the last drain.
    pub async fn drain_events(&self) -> Vec<EngineEvent> {
        self.state.lock().await.engine.drain_events()
    }

    /// Stop all background work.
    ///
    /// Waits for the clock to stop and for every summary already handed to
    /// the recorder to be written.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let (clock, recording) = {
            let mut state = self.state.lock().await;
            (state.clock.take(), state.recording.take())
        };
        if let Some(handle) = clock {
            if let Err(err) = handle.await {
                debug!(%err, "clock task did not finish cleanly");
            }
        }
        if let Some(handle) = recording {
            if let Err(err) = handle.await {
                warn!(%err, "recording task did not finish cleanly");
            }
        }
    }

    fn spawn_clock(&self, state: &DriverState) -> JoinHandle<()> {
        let shared = Arc::clone(&self.state);
        let cancel = state.clock_token.clone();
        let generation = state.engine.generation();
        let period = state.engine.config().tick_interval();

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        debug!(generation, "clock cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let mut state = shared.lock().await;
                        // Paused or restarted while waiting for the lock
                        if cancel.is_cancelled() || state.engine.generation() != generation {
                            break;
                        }
                        match state.engine.tick() {
                            TickOutcome::Ticked { .. } => {}
                            TickOutcome::TimeUp => {
                                debug!(generation, "clock ran out");
                                state.session_token.cancel();
                                break;
                            }
                            TickOutcome::Ignored => break,
                        }
                    }
                }
            }
        })
    }

    fn spawn_resolution(
        &self,
        ticket: ResolutionTicket,
        delay: Duration,
        cancel: CancellationToken,
    ) {
        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(?ticket, "resolution cancelled");
                }
                () = sleep(delay) => {
                    let mut state = shared.lock().await;
                    if cancel.is_cancelled() {
                        debug!(?ticket, "resolution cancelled");
                        return;
                    }
                    let outcome = state.engine.resolve(ticket);
                    debug!(?ticket, ?outcome, "pair resolved");
                }
            }
        });
    }
}

/// Feed summaries to `recorder` on the blocking pool, one at a time.
///
/// Runs until every sender is gone, or until `shutdown` fires with nothing
/// left to record.
fn spawn_recording(
    mut recorder: Box<dyn ScoreRecorder>,
    mut summaries: UnboundedReceiver<GameSummary>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                summary = summaries.recv() => {
                    let Some(summary) = summary else { break };
                    let written = tokio::task::spawn_blocking(move || {
                        recorder.record(&summary);
                        recorder
                    })
                    .await;
                    match written {
                        Ok(returned) => recorder = returned,
                        Err(err) => {
                            warn!(%err, "score recorder failed, recording stopped");
                            break;
                        }
                    }
                }
                () = shutdown.cancelled() => break,
            }
        }
    })
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for SessionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}
