//! Client-side navigation for the drone console single-page application.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser URL / shell request
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │  Router  │──▶│  table   │──▶│ matcher  │
//!   └────┬─────┘   └────┬─────┘   └──────────┘
//!        │              │
//!        │              ▼
//!        │         ┌──────────┐
//!        │         │  record  │──▶ eager view / lazy fetch (cached)
//!        │         └──────────┘
//!        ▼
//!   ┌──────────┐
//!   │ History  │  push / replace / go
//!   └──────────┘
//! ```
//!
//! `app::build_router` declares the five application routes and returns the
//! configured [`Router`], which the shell owns for the rest of the session.

pub mod app;
pub mod config;
pub mod history;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use routing::{NavigationError, Route, Router};
pub use view::{StaticView, View, ViewRef};
