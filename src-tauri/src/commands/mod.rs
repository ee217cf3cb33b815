//! Commands Layer
//!
//! Tauri command handlers that bridge the UI to the host services.

mod api_cmd;
mod app_cmd;
mod update_cmd;

pub use api_cmd::*;
pub use app_cmd::*;
pub use update_cmd::*;
