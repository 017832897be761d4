//! Shared domain types and check-in pipeline logic for MindTrack.

pub mod error;
pub mod guard;
pub mod history;
pub mod mood;
pub mod normalize;
pub mod trend;
