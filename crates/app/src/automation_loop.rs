//! Automation loop — the cross-device poll/decide/dispatch state machine.
//!
//! One logical task owns the whole flow: refresh the litter box, evaluate the
//! trigger predicate, and on a positive decision resolve and execute the
//! configured vacuum routine, then cool down. Every scheduling decision is a
//! value: [`AutomationLoop::step`] advances the machine by one state and
//! returns the pause to apply before the next step, so the retry/backoff
//! policy is testable without sleeping.
//!
//! Error posture follows the read/write asymmetry of the domain: read-path
//! failures (refresh, routine listing) are logged and absorbed — the loop
//! itself is the retry mechanism — while the one side-effecting write
//! (execute) is never re-attempted in place.

use std::time::Duration;

use litterlink_domain::routine::{ActionRoutine, find_routine};
use litterlink_domain::time::Timestamp;
use litterlink_domain::trigger::{TriggerEvent, TriggerPolicy};

use crate::ports::{ActionDeviceClient, SourceDeviceClient};

/// Tuning knobs for the loop, constructed once at startup from
/// configuration and passed in — the state machine performs no implicit
/// process-wide lookups.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Which trigger predicate to run.
    pub policy: TriggerPolicy,
    /// Maximum age of an observed event/heartbeat still considered fresh.
    pub staleness_window: Duration,
    /// Pause between polls, also used after transient failures.
    pub poll_interval: Duration,
    /// Settle time between a positive trigger and routine resolution.
    pub pre_action_delay: Duration,
    /// Pause before re-polling when the configured routine does not exist.
    pub not_found_backoff: Duration,
    /// Pause after a successful execution, so one physical event cannot
    /// trigger a second vacuum pass.
    pub post_action_cooldown: Duration,
    /// Name of the routine to execute, matched case-sensitively.
    pub routine_name: String,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            policy: TriggerPolicy::default(),
            staleness_window: Duration::from_secs(10 * 60),
            poll_interval: Duration::from_secs(60),
            pre_action_delay: Duration::ZERO,
            not_found_backoff: Duration::from_secs(10),
            post_action_cooldown: Duration::from_secs(15 * 60),
            routine_name: "Litter".to_string(),
        }
    }
}

/// The loop's control state. Owned exclusively by the loop; nothing else
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Refresh the source device and evaluate the trigger predicate.
    Polling,
    /// A trigger fired; wait for the physical cycle to settle.
    PreActionDelay,
    /// Look up the configured routine on the action device.
    Resolving,
    /// Execute the resolved routine, exactly once.
    Executing {
        /// The routine resolved in the previous state.
        routine: ActionRoutine,
    },
    /// Sleep out the cooldown after a successful execution.
    PostActionCooldown,
}

/// The poll/decide/dispatch loop over one source device and one action
/// device.
pub struct AutomationLoop<S, A> {
    source: S,
    action: A,
    settings: LoopSettings,
    mode: Mode,
}

impl<S, A> AutomationLoop<S, A>
where
    S: SourceDeviceClient,
    A: ActionDeviceClient,
{
    /// Create a loop in `Polling` mode.
    pub fn new(source: S, action: A, settings: LoopSettings) -> Self {
        Self {
            source,
            action,
            settings,
            mode: Mode::Polling,
        }
    }

    /// The current control state.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Run forever, sleeping between steps.
    ///
    /// There is no internal shutdown condition — the process is expected to
    /// run under a supervisor and be terminated externally.
    pub async fn run(mut self) {
        loop {
            let pause = self.step(litterlink_domain::time::now()).await;
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }

    /// Advance the machine by one state and return the pause to apply before
    /// the next step.
    pub async fn step(&mut self, now: Timestamp) -> Duration {
        let mode = std::mem::replace(&mut self.mode, Mode::Polling);
        let (next, pause) = match mode {
            Mode::Polling => self.poll(now).await,
            Mode::PreActionDelay => self.settle(),
            Mode::Resolving => self.resolve().await,
            Mode::Executing { routine } => self.execute(&routine).await,
            Mode::PostActionCooldown => self.cool_down(),
        };
        self.mode = next;
        pause
    }

    async fn poll(&self, now: Timestamp) -> (Mode, Duration) {
        let snapshot = match self.source.refresh().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // Indistinguishable from "no event yet" in cadence: log and
                // re-poll at the standard interval.
                tracing::warn!(%err, "refresh failed, retrying next poll");
                return (Mode::Polling, self.settings.poll_interval);
            }
        };

        match self
            .settings
            .policy
            .evaluate(&snapshot, now, self.settings.staleness_window)
        {
            TriggerEvent::Fired {
                reason,
                observed_at,
            } => {
                tracing::info!(?reason, %observed_at, "trigger fired");
                (Mode::PreActionDelay, Duration::ZERO)
            }
            TriggerEvent::Held { reason } => {
                tracing::info!(?reason, "trigger held, polling again");
                (Mode::Polling, self.settings.poll_interval)
            }
        }
    }

    fn settle(&self) -> (Mode, Duration) {
        if !self.settings.pre_action_delay.is_zero() {
            tracing::info!(
                delay_secs = self.settings.pre_action_delay.as_secs(),
                "waiting for the cycle to settle before acting"
            );
        }
        (Mode::Resolving, self.settings.pre_action_delay)
    }

    async fn resolve(&self) -> (Mode, Duration) {
        let routines = match self.action.list_routines().await {
            Ok(routines) => routines,
            Err(err) => {
                tracing::warn!(%err, "listing routines failed, resuming polling");
                return (Mode::Polling, self.settings.poll_interval);
            }
        };

        match find_routine(&routines, &self.settings.routine_name) {
            Some(routine) => {
                tracing::info!(routine = %routine.id, name = %routine.name, "routine resolved");
                (
                    Mode::Executing {
                        routine: routine.clone(),
                    },
                    Duration::ZERO,
                )
            }
            None => {
                // Routine configuration can change on the vendor side
                // independently of this process; not fatal.
                tracing::warn!(
                    name = %self.settings.routine_name,
                    available = routines.len(),
                    "routine not found, resuming polling"
                );
                (Mode::Polling, self.settings.not_found_backoff)
            }
        }
    }

    async fn execute(&self, routine: &ActionRoutine) -> (Mode, Duration) {
        match self.action.execute_routine(&routine.id).await {
            Ok(()) => {
                tracing::info!(routine = %routine.id, "routine executed");
                (Mode::PostActionCooldown, Duration::ZERO)
            }
            Err(err) => {
                // The call may have partially succeeded on the vendor side;
                // re-attempting risks a double actuation. Back to polling.
                tracing::error!(%err, routine = %routine.id, "execute failed, not retrying");
                (Mode::Polling, self.settings.poll_interval)
            }
        }
    }

    fn cool_down(&self) -> (Mode, Duration) {
        tracing::info!(
            cooldown_secs = self.settings.post_action_cooldown.as_secs(),
            "entering post-action cooldown"
        );
        (Mode::Polling, self.settings.post_action_cooldown)
    }
}
