use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use super::feedback::{FeedbackEvent, FeedbackSink};
use super::refresh::RefreshSource;
use crate::localization::ErrorLocalizer;

/// Observable state of one action control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleState {
    pub busy: bool,
    /// Bumped on teardown; runs started under an older value go quiet.
    pub generation: u64,
    pub torn_down: bool,
    /// Set when a run succeeds, before busy clears.
    pub succeeded: bool,
}

/// Collaborators a run talks to once the mutation settles.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    pub refresh: Option<&'a dyn RefreshSource>,
    pub feedback: &'a dyn FeedbackSink,
    pub errors: &'a ErrorLocalizer,
}

impl<'a> RunContext<'a> {
    pub fn new(feedback: &'a dyn FeedbackSink, errors: &'a ErrorLocalizer) -> Self {
        Self {
            refresh: None,
            feedback,
            errors,
        }
    }

    pub fn with_refresh(mut self, refresh: &'a dyn RefreshSource) -> Self {
        self.refresh = Some(refresh);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// Mutation succeeded, refresh settled and success feedback was emitted.
    Succeeded(T),
    /// Mutation failed and error feedback was emitted.
    Failed,
    /// The controller was torn down before the run settled. Nothing was emitted.
    Suppressed,
    /// A run was already in flight. Nothing happened.
    Rejected,
}

impl<T> RunOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded(_))
    }
}

/// Single-flight runner for one action control.
///
/// Clones share state, so a clone can be moved into a spawned task while the
/// widget keeps reading [`ActionController::is_busy`] for rendering.
#[derive(Debug, Clone, Default)]
pub struct ActionController {
    state: Arc<Mutex<LifecycleState>>,
}

impl ActionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        *self.lock()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    pub fn is_torn_down(&self) -> bool {
        self.lock().torn_down
    }

    /// Whether any run on this controller has succeeded. One-shot controls
    /// such as dialog submits stay disabled from then on.
    pub fn has_succeeded(&self) -> bool {
        self.lock().succeeded
    }

    /// Detaches the controller from its owner. Any in-flight run keeps going
    /// on the network but emits nothing and leaves state alone.
    pub fn teardown(&self) {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        state.torn_down = true;
        state.busy = false;
    }

    /// Runs `action`, refreshes on success and reports the outcome.
    ///
    /// Busy is set before the first await and cleared after the feedback
    /// has been emitted, on every path.
    pub async fn run<T, F>(&self, ctx: RunContext<'_>, success_message: impl Into<String>, action: F) -> RunOutcome<T>
    where
        F: Future<Output = Result<T, crate::auth::AuthError>>,
    {
        let generation = {
            let mut state = self.lock();
            if state.torn_down {
                log::debug!("Ignoring run on a torn down controller");
                return RunOutcome::Suppressed;
            }
            if state.busy {
                log::warn!("Action triggered while another run is in flight; ignoring");
                return RunOutcome::Rejected;
            }
            state.busy = true;
            state.generation
        };
        let _busy = BusyGuard {
            state: &self.state,
            generation,
        };

        let result = action.await;
        if !self.is_current(generation) {
            log::debug!("Controller torn down while the mutation was in flight");
            return RunOutcome::Suppressed;
        }

        match result {
            Ok(value) => {
                if let Some(refresh) = ctx.refresh {
                    if let Err(err) = refresh.refetch().await {
                        log::warn!("Refresh after successful mutation failed: {err}");
                    }
                    if !self.is_current(generation) {
                        log::debug!("Controller torn down while refreshing");
                        return RunOutcome::Suppressed;
                    }
                }
                self.lock().succeeded = true;
                ctx.feedback.notify(FeedbackEvent::success(success_message));
                RunOutcome::Succeeded(value)
            }
            Err(err) => {
                log::warn!("Mutation failed: {err}");
                ctx.feedback.notify(FeedbackEvent::error(ctx.errors.message(&err)));
                RunOutcome::Failed
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    fn lock(&self) -> MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct BusyGuard<'a> {
    state: &'a Mutex<LifecycleState>,
    generation: u64,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.generation == self.generation {
            state.busy = false;
        }
    }
}
