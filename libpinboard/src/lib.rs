//! Pinboard - application state core for a bookmarking client
//!
//! This library models every screen of a Pinboard client as an immutable
//! value and moves between them with actions, so the behaviour of the
//! client can be driven and tested without any UI.

pub mod appstate;
pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use appstate::{Action, AppStateRepository, Content};
pub use config::Config;
pub use error::{ApiError, ConfigError, PinboardError, Result};
pub use repository::Collaborators;
pub use service::PinboardService;
pub use types::{Note, Post, PostListResult, Tag};
