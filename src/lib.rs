//! Paper Desk - progress timelines and form checks for a journal submission system
//!
//! This library provides the display-side rules of the author, expert and
//! editor pages, including:
//! - Progress-to-timeline resolution over a static stage catalog
//! - Models for paper, review assignment, withdrawal and profile payloads
//! - Client-side form checks with per-field error collection
//! - Configuration, date/time utilities and CLI command handling
//!
//! # Example
//!
//! ```
//! use paperdesk::progress::{derive_current_stage, map_progress_to_stages, ProgressRecord};
//!
//! let progress = ProgressRecord::new()
//!     .with("submission_status", "finished")
//!     .with("submission_time", "2024-01-02T10:00:00");
//! let stages = map_progress_to_stages(&progress);
//! assert_eq!(stages[0].key, "submission");
//! assert_eq!(derive_current_stage(&progress), Some("初审"));
//! ```

pub mod cli;
pub mod config;
pub mod models;
pub mod progress;
pub mod utils;
pub mod validate;
