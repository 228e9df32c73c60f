//! The UML class: one contract, interface, library, struct, enum or import group.

use smol_str::SmolStr;

use super::association::{Association, AssociationTable, MergeOutcome};
use super::error::{ModelError, ModelResult};
use super::member::{Attribute, Constant, Import, MemberRef, Operator};
use super::types::ClassStereotype;
use crate::base::{ClassId, IdAllocator};

// ============================================================================
// CLASS PROPERTIES
// ============================================================================

/// Everything needed to construct a [`UmlClass`].
///
/// `name` and both paths are required; every other field starts empty and is
/// set through the `with_*` builders.
///
/// This is also the deserialization target for stored classes: read the JSON
/// of a [`UmlClass`] into properties and construct a new class from them, so
/// the name is checked and the id comes from an allocator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassProperties {
    pub name: SmolStr,
    pub absolute_path: String,
    pub relative_path: String,
    pub parent_id: Option<ClassId>,
    pub stereotype: Option<ClassStereotype>,
    pub imported_file_names: Vec<String>,
    pub imports: Vec<Import>,
    pub enums: Vec<ClassId>,
    pub structs: Vec<ClassId>,
    pub attributes: Vec<Attribute>,
    pub operators: Vec<Operator>,
    pub constants: Vec<Constant>,
    pub associations: AssociationTable,
}

impl ClassProperties {
    pub fn new(
        name: impl Into<SmolStr>,
        absolute_path: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            absolute_path: absolute_path.into(),
            relative_path: relative_path.into(),
            ..Self::default()
        }
    }

    /// Containing class of a nested struct or enum.
    pub fn with_parent_id(mut self, parent_id: ClassId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_stereotype(mut self, stereotype: ClassStereotype) -> Self {
        self.stereotype = Some(stereotype);
        self
    }

    pub fn with_imported_file_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.imported_file_names.extend(names);
        self
    }

    pub fn with_imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn with_enums(mut self, ids: impl IntoIterator<Item = ClassId>) -> Self {
        self.enums.extend(ids);
        self
    }

    pub fn with_structs(mut self, ids: impl IntoIterator<Item = ClassId>) -> Self {
        self.structs.extend(ids);
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.operators.extend(operators);
        self
    }

    pub fn with_constants(mut self, constants: impl IntoIterator<Item = Constant>) -> Self {
        self.constants.extend(constants);
        self
    }

    /// Use `associations` as the association table.
    ///
    /// Unlike the other builders this replaces rather than extends, since
    /// merging could fail; call [`UmlClass::add_association`] to merge.
    pub fn with_associations(mut self, associations: AssociationTable) -> Self {
        self.associations = associations;
        self
    }
}

// ============================================================================
// UML CLASS
// ============================================================================

/// A named structural construct found in a source file.
///
/// Built once by the parser, filled in incrementally through the public
/// member vectors and [`add_association`](Self::add_association), then read
/// by the renderer. Nested structs/enums and association targets are held
/// as ids and names, never as owned classes; see
/// [`ClassRegistry`](super::ClassRegistry) for resolving them.
///
/// Serialize only; deserialize into [`ClassProperties`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UmlClass {
    id: ClassId,
    pub name: SmolStr,
    pub absolute_path: String,
    pub relative_path: String,
    /// Containing class of a nested struct or enum. Not an ownership link.
    pub parent_id: Option<ClassId>,
    pub stereotype: Option<ClassStereotype>,
    pub imported_file_names: Vec<String>,
    pub imports: Vec<Import>,
    pub enums: Vec<ClassId>,
    pub structs: Vec<ClassId>,
    pub attributes: Vec<Attribute>,
    pub operators: Vec<Operator>,
    pub constants: Vec<Constant>,
    pub associations: AssociationTable,
}

impl UmlClass {
    /// Construct a class with an id from the process-wide allocator.
    pub fn new(properties: ClassProperties) -> ModelResult<Self> {
        Self::with_allocator(properties, IdAllocator::global())
    }

    /// Construct a class with an id from `ids`.
    ///
    /// Fails with `InvalidArgument` when the name is empty. No id is consumed
    /// on failure.
    pub fn with_allocator(properties: ClassProperties, ids: &IdAllocator) -> ModelResult<Self> {
        if properties.name.is_empty() {
            return Err(ModelError::missing_name());
        }

        let ClassProperties {
            name,
            absolute_path,
            relative_path,
            parent_id,
            stereotype,
            imported_file_names,
            imports,
            enums,
            structs,
            attributes,
            operators,
            constants,
            associations,
        } = properties;

        Ok(Self {
            id: ids.next_id(),
            name,
            absolute_path,
            relative_path,
            parent_id,
            stereotype,
            imported_file_names,
            imports,
            enums,
            structs,
            attributes,
            operators,
            constants,
            associations,
        })
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Record a relationship to another class.
    ///
    /// Merges with any existing association to the same target: `Storage`
    /// upgrades `Memory`, everything else keeps its first value.
    pub fn add_association(&mut self, association: Association) -> ModelResult<MergeOutcome> {
        self.associations.record(association)
    }

    pub fn association(&self, target: &str) -> Option<&Association> {
        self.associations.get(target)
    }

    /// Direct parents: the associations marked as realization.
    ///
    /// Only one level; walk recursively (or use
    /// [`ClassRegistry::ancestors`](super::ClassRegistry::ancestors)) for grandparents.
    /// The order of the result is unspecified.
    pub fn parent_contracts(&self) -> Vec<&Association> {
        self.associations.realizations().collect()
    }

    /// True for a struct or enum declared inside another class.
    pub fn is_nested(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn stereotype(&self) -> ClassStereotype {
        self.stereotype.unwrap_or_default()
    }

    /// Attributes followed by operators.
    pub fn members(&self) -> impl Iterator<Item = MemberRef<'_>> {
        self.attributes
            .iter()
            .map(MemberRef::Attribute)
            .chain(self.operators.iter().map(MemberRef::Operator))
    }
}
