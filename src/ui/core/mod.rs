//! Core UI functionality for authdeck.
//!
//! This module contains the fundamental building blocks for the user interface:
//! event handling, the component abstraction, the shared context and the
//! background task manager that runs loads and mutations.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`context`] - Shared collaborators and the queries behind each card
//! - [`event_handler`] - Keyboard polling and ticks
//! - [`task_manager`] - Background loads and lifecycle runs

// Core UI modules
pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

// Re-export core types for easier access from other modules
pub use actions::{Action, CardFocus, DataKind, DialogType, MutationRequest, RefreshHandle};
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{ChannelFeedback, TaskId, TaskManager, TaskResult};
