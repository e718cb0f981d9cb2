//! Holonet - a terminal browser for the Star Wars API
//!
//! This crate provides the screens, navigation and fetching behind the
//! `holonet` binary: entity lists with live search, swipe-to-open rows,
//! and detail pages for planets, films and starships.

pub mod animation;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod loader;
pub mod logging;
pub mod tui;

// Re-export primary types for convenience
pub use api::{ResourceFetcher, SwapiClient};
pub use app::{App, AppFlow, Screen};
pub use config::UserConfig;
pub use domain::navigation::{NavParams, Navigator, Route};
pub use domain::screen::{DetailScreen, ListScreen, ScreenState, Selection};
pub use domain::{filter_summaries, EntityConfig, EntityKind, ResourceDetail, ResourceSummary};
pub use error::{HolonetError, Result};
