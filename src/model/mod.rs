//! The UML class model populated by the parser and read by the renderer.
//!
//! ## Key Types
//!
//! - [`UmlClass`] - a contract, interface, library, struct, enum or import group
//! - [`Attribute`], [`Operator`], [`Constant`] - class members
//! - [`Association`] - a named, deduplicated edge to another class
//! - [`ClassRegistry`] - owns all classes of a run and resolves references
//!
//! ## Population Flow
//!
//! ```text
//! parser ──create(props)──────────▶ ClassRegistry ──▶ UmlClass (fresh ClassId)
//!        ──add_association(..)────▶ AssociationTable (merge per target name)
//!
//! renderer ◀── iter / parent_contracts / ancestors / squash
//! ```

mod association;
mod class;
pub mod error;
mod member;
mod registry;
mod squash;
mod types;

pub use association::{Association, AssociationTable, MergeOutcome};
pub use class::{ClassProperties, UmlClass};
pub use error::{ModelError, ModelResult};
pub use member::{
    Attribute, Constant, Import, ImportedName, Member, MemberInfo, MemberRef, Operator, Parameter,
};
pub use registry::{ClassRegistry, SharedRegistry};
pub use squash::operator_hash;
pub use types::{AttributeType, ClassStereotype, OperatorStereotype, ReferenceType, Visibility};
