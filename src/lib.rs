//! authdeck - a terminal console for Better Auth organizations
//!
//! This library provides the account, organization and team management
//! screens of a Better Auth deployment as a terminal UI, built with Ratatui
//! on top of an injected auth client.
//!
//! # Modules
//!
//! * [`auth`] - Auth client trait with HTTP and in-memory implementations
//! * [`config`] - Application configuration management
//! * [`hooks`] - Refetchable queries behind each card
//! * [`lifecycle`] - Mutation-and-refresh lifecycle of every action control
//! * [`localization`] - String tables and error localization
//! * [`ui`] - Terminal user interface components

/// Auth service clients
pub mod auth;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Data models returned by the auth service
pub mod entities;

/// Data queries used as refresh sources
pub mod hooks;

/// Action lifecycle controller, mutations and toggles
pub mod lifecycle;

/// Localized strings
pub mod localization;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions and helpers
pub mod utils;

pub use entities::{team, Account, Member, Team};
