//! SynergySphere Core Library
//!
//! Domain models and business rules for the team-collaboration dashboard:
//! the in-memory workspace, its mutations and notification side effects,
//! and the derived views (dashboard, analytics, SWOT).

pub mod access;
pub mod analytics;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod discussion;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod notifier;
pub mod profile;
pub mod project;
pub mod seed;
pub mod store;
pub mod swot;
pub mod task;
pub mod user;
pub mod workspace;

pub use error::{SynergyError, SynergyResult};
pub use workspace::Workspace;
