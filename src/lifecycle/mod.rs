//! Mutation-and-refresh lifecycle shared by every action control.
//!
//! A control owns an [`ActionController`]. Triggering the control runs one
//! mutation through the controller, which refreshes the dependent data on
//! success, emits exactly one [`FeedbackEvent`], and clears its busy flag
//! once everything has settled.
//!
//! # Module Components
//!
//! - [`controller`] - busy flag, generation token and the `run` state machine
//! - [`arena`] - one controller per list row, keyed by row id
//! - [`feedback`] - feedback events and the sink they are sent to
//! - [`mutation`] - named mutations and the toggle descriptors that pick them
//! - [`refresh`] - the refetch boundary invoked after a successful mutation

pub mod arena;
pub mod controller;
pub mod feedback;
pub mod mutation;
pub mod refresh;

pub use arena::ControllerArena;
pub use controller::{ActionController, LifecycleState, RunContext, RunOutcome};
pub use feedback::{FeedbackEvent, FeedbackKind, FeedbackSink, RecordingFeedback};
pub use mutation::{
    validate_team_name, MembershipToggle, Mutation, MutationResponse, ProviderToggle, TargetState, Toggle,
};
pub use refresh::RefreshSource;
