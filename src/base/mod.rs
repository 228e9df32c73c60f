//! Foundation types for the class model.
//!
//! - [`ClassId`] - Identifier of a UML class
//! - [`IdAllocator`] - Atomic source of fresh class ids
//!
//! This module has NO dependencies on other soluml modules.

mod ids;

pub use ids::{ClassId, IdAllocator};
