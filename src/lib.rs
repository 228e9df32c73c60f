//! # solidity-uml-model
//!
//! UML class model for Solidity source analysis.
//!
//! A parser walks Solidity files and records every contract, interface,
//! library, struct and enum it finds as a [`UmlClass`], together with its
//! members and its associations to other classes. A renderer then reads the
//! model back to draw a class diagram.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → UmlClass, members, associations, ClassRegistry, squash
//!   ↓
//! base      → Primitives (ClassId, IdAllocator)
//! ```

// ============================================================================
// MODULES (dependency order: base → model)
// ============================================================================

/// Foundation types: ClassId, IdAllocator
pub mod base;

/// Class model: classes, members, associations and the class registry
pub mod model;

// Re-export foundation types
pub use base::{ClassId, IdAllocator};

// Re-export commonly needed items
pub use model::{
    Association, AssociationTable, Attribute, AttributeType, ClassProperties, ClassRegistry,
    ClassStereotype, Constant, Import, ImportedName, MergeOutcome, ModelError, ModelResult,
    Operator, OperatorStereotype, Parameter, ReferenceType, UmlClass, Visibility,
};
