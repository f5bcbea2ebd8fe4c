//! Static term lists.
//!
//! The lists are plain files, one term per line, read once at startup and
//! shared read-only afterwards:
//! - `ClaimLists`: predicates and scientific terms for category 1
//! - `DomainLists`: scientific domains for category 2
//! - `ResearchLists`: research vocabulary for category 3

pub mod loader;

pub use loader::{ClaimLists, DomainLists, ResearchLists, TermList};
