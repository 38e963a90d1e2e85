//! Shared control state for the stepping loop.
//!
//! The collaborator driving the simulation (a UI, a test, a binary) holds
//! this state in an [`Arc`] and uses it to stop, pause, resume, and retime
//! the loop while it runs. All mutable fields are [`std::sync::atomic`]
//! types so the loop's hot path never takes a lock.
//!
//! Stopping is a request, not a preemption: the loop checks the flag
//! before every step, so a stop observed at any point guarantees no
//! further committed generation.
//!
//! [`Arc`]: std::sync::Arc

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Notify;

use crate::config::RunConfig;

/// Smallest accepted step interval in milliseconds.
pub const MIN_STEP_INTERVAL_MS: u64 = 10;

/// Shared control plane between the stepping loop and the collaborator.
#[derive(Debug)]
pub struct ControlState {
    /// Whether the loop is currently between `begin_run` and `end_run`.
    running: AtomicBool,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Whether stepping is paused.
    paused: AtomicBool,

    /// Notification used to wake the loop when resumed.
    resume_notify: Notify,

    /// Current step interval in milliseconds (runtime-adjustable).
    step_interval_ms: AtomicU64,

    /// Maximum number of generations per run (0 = unlimited).
    max_generations: u64,

    /// Whether a run ends when a step changes nothing.
    stop_when_stable: bool,
}

impl ControlState {
    /// Create control state from a run configuration.
    pub fn new(run: &RunConfig) -> Self {
        Self {
            running: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            step_interval_ms: AtomicU64::new(run.step_interval_ms),
            max_generations: run.max_generations,
            stop_when_stable: run.stop_when_stable,
        }
    }

    // -----------------------------------------------------------------------
    // Running flag (maintained by the loop)
    // -----------------------------------------------------------------------

    /// Check whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Record whether a run is in progress. Called by the run loop only.
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request that the loop stop before its next step.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        // A paused loop must wake up to observe the stop.
        self.resume_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Clear a previous stop request so a new run can start.
    pub fn clear_stop(&self) {
        self.stop_requested.store(false, Ordering::Release);
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether stepping is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause stepping. The loop sleeps until resumed or stopped.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume stepping and wake the loop. No-op if not paused.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until stepping is no longer paused or a stop is requested.
    ///
    /// Returns immediately if not paused.
    pub async fn wait_if_paused(&self) {
        while self.paused.load(Ordering::Acquire) && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Step interval
    // -----------------------------------------------------------------------

    /// Get the current step interval in milliseconds.
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms.load(Ordering::Acquire)
    }

    /// Set the step interval in milliseconds.
    ///
    /// Returns the previous interval on success, or `None` if the value
    /// was rejected (below [`MIN_STEP_INTERVAL_MS`]).
    pub fn set_step_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_STEP_INTERVAL_MS {
            return None;
        }
        let prev = self.step_interval_ms.swap(ms, Ordering::AcqRel);
        Some(prev)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Check whether the generation limit has been reached.
    ///
    /// Returns `true` if `max_generations > 0` and at least that many
    /// generations have run.
    pub const fn generation_limit_reached(&self, generations_run: u64) -> bool {
        self.max_generations > 0 && generations_run >= self.max_generations
    }

    /// Get the configured maximum generations (0 = unlimited).
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Whether a run ends when a step changes nothing.
    pub const fn stop_when_stable(&self) -> bool {
        self.stop_when_stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_run_config() -> RunConfig {
        RunConfig {
            step_interval_ms: 100,
            max_generations: 0,
            stop_when_stable: false,
        }
    }

    #[test]
    fn initial_state() {
        let state = ControlState::new(&default_run_config());
        assert!(!state.is_running());
        assert!(!state.is_stop_requested());
        assert!(!state.is_paused());
        assert_eq!(state.step_interval_ms(), 100);
    }

    #[test]
    fn stop_request_and_clear() {
        let state = ControlState::new(&default_run_config());
        state.request_stop();
        assert!(state.is_stop_requested());
        state.clear_stop();
        assert!(!state.is_stop_requested());
    }

    #[test]
    fn pause_and_resume_flags() {
        let state = ControlState::new(&default_run_config());
        state.pause();
        assert!(state.is_paused());
        state.resume();
        assert!(!state.is_paused());
    }

    #[test]
    fn set_step_interval() {
        let state = ControlState::new(&default_run_config());
        let prev = state.set_step_interval_ms(250);
        assert_eq!(prev, Some(100));
        assert_eq!(state.step_interval_ms(), 250);
    }

    #[test]
    fn reject_sub_minimum_interval() {
        let state = ControlState::new(&default_run_config());
        assert!(state.set_step_interval_ms(5).is_none());
        assert_eq!(state.step_interval_ms(), 100);
    }

    #[test]
    fn generation_limit_zero_means_unlimited() {
        let state = ControlState::new(&default_run_config());
        assert!(!state.generation_limit_reached(999_999));
    }

    #[test]
    fn generation_limit_reached() {
        let run = RunConfig {
            step_interval_ms: 100,
            max_generations: 50,
            stop_when_stable: false,
        };
        let state = ControlState::new(&run);
        assert!(!state.generation_limit_reached(49));
        assert!(state.generation_limit_reached(50));
        assert!(state.generation_limit_reached(51));
    }

    #[tokio::test]
    async fn wait_if_paused_returns_after_resume() {
        use std::sync::Arc;

        let state = Arc::new(ControlState::new(&default_run_config()));
        state.pause();

        let waiter = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            waiter.wait_if_paused().await;
        });

        // Give the waiter a chance to park, then release it.
        tokio::task::yield_now().await;
        state.resume();
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn stop_releases_a_paused_waiter() {
        use std::sync::Arc;

        let state = Arc::new(ControlState::new(&default_run_config()));
        state.pause();

        let waiter = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            waiter.wait_if_paused().await;
        });

        tokio::task::yield_now().await;
        state.request_stop();
        assert!(handle.await.is_ok());
    }
}
