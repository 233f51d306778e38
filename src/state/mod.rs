//! Shared crawl state
//!
//! This module provides the two pieces of state that worker tasks share with
//! the scheduler loop.
//!
//! # Components
//!
//! - `VisitedSet`: deduplication authority; a URL is claimed at most once
//! - `PageBudget`: capped atomic counter of successfully fetched pages

mod budget;
mod visited;

// Re-export main types
pub use budget::PageBudget;
pub use visited::VisitedSet;
