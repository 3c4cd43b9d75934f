//! Constants used throughout the application
//!
//! This module centralizes file names, defaults and UI text that is not part
//! of the localization table.

pub const APP_NAME: &str = "authdeck";

// Configuration
pub const CONFIG_FILE_NAME: &str = "authdeck.toml";
pub const CONFIG_DIR_NAME: &str = "authdeck";
pub const CONFIG_DIR_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "authdeck.log";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/auth";
pub const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/settings";
pub const DEFAULT_SESSION_TOKEN_ENV: &str = "AUTHDECK_SESSION_TOKEN";
/// Organization used by the in-memory client when none is configured.
pub const DEMO_ORGANIZATION_ID: &str = "org-demo";

/// Request timeout applied by the HTTP client, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// Toasts
pub const DEFAULT_TOAST_DURATION_SECS: u64 = 4;
pub const MAX_TOAST_DURATION_SECS: u64 = 60;
pub const MAX_VISIBLE_TOASTS: usize = 3;

// Views
pub const VIEW_TEAMS: &str = "teams";
pub const VIEW_MEMBERS: &str = "members";
pub const VIEW_PROVIDERS: &str = "providers";
pub const VIEWS: [&str; 3] = [VIEW_TEAMS, VIEW_MEMBERS, VIEW_PROVIDERS];

// Logging
/// In-memory log entries kept for the logs dialog
pub const LOG_BUFFER_CAPACITY: usize = 500;

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_SESSION_TOKEN: &str = "❌ Error: session token environment variable not set";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc' or 'q' to close";
pub const STATUS_HINTS: &str = "Tab: switch card  j/k: move  Enter: open  L: logs  q: quit";

// Rendering
/// Appended to text cut short by the overflow tracker
pub const OVERFLOW_MARKER: &str = "…";
pub const SKELETON_ROWS: usize = 3;
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
