//! Class model tests
//!
//! - Class construction and id allocation
//! - Association recording and merge rules
//! - Registry lookups and ancestor walks
//! - Squashed classes

pub mod tests_associations;
pub mod tests_class;
pub mod tests_squash;
