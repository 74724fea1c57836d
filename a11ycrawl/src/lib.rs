pub mod commands;
pub mod handlers;
pub mod server;

// Re-export commonly used handler functions for convenience
pub use handlers::{axe_source_from_matches, json_to_stdout, parse_url_line, settings_from_matches};
pub use server::{AppState, build_app};
