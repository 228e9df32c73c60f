//! Squashed classes: one class holding the members of a class and all of its ancestors.
//!
//! Every member is tagged with the class it came from. Operators additionally
//! get a signature hash and the inheritance position of their defining class
//! in the C3 linearization (0 for the squashed class itself, then towards the
//! most base class, so in `A is B, C` the class `C` sits at 1). When two
//! classes define the same signature only the most derived one is kept.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use rustc_hash::{FxHashSet, FxHasher};
use smol_str::{SmolStr, format_smolstr};
use tracing::debug;

use super::association::AssociationTable;
use super::class::{ClassProperties, UmlClass};
use super::error::{ModelError, ModelResult};
use super::member::{Attribute, Constant, Operator};
use super::registry::ClassRegistry;
use super::types::OperatorStereotype;
use crate::base::ClassId;

/// Hash of an operator's kind, name and parameter types.
///
/// Two operators with the same hash override one another. Abstract, payable
/// and fallback operators are all functions here, so an implementation
/// overrides the abstract declaration it fulfils.
pub fn operator_hash(operator: &Operator) -> SmolStr {
    let kind = match operator.stereotype {
        OperatorStereotype::Modifier => "modifier",
        OperatorStereotype::Event => "event",
        _ => "function",
    };
    let mut hasher = FxHasher::default();
    kind.hash(&mut hasher);
    operator.info.name.hash(&mut hasher);
    for param in &operator.parameters {
        param.type_name.hash(&mut hasher);
    }
    format_smolstr!("{:016x}", hasher.finish())
}

impl ClassRegistry {
    /// Build the squashed view of class `id`.
    ///
    /// The result gets a fresh id from this registry but is not stored in it.
    /// Usage associations of every class in the chain are merged into it;
    /// realizations are dropped since the ancestors are now part of the class.
    pub fn squash(&self, id: ClassId) -> ModelResult<UmlClass> {
        let class = self.get(id).ok_or(ModelError::UnknownClass(id))?;

        let chain: Vec<(u32, &UmlClass)> = (0u32..)
            .zip(self.linearize(id)?)
            .filter_map(|(position, class_id)| Some((position, self.get(class_id)?)))
            .collect();

        // Most base class first, matching storage layout order.
        let attributes: Vec<Attribute> = chain
            .iter()
            .rev()
            .flat_map(|(_, source)| {
                source
                    .attributes
                    .iter()
                    .map(move |attr| attr.clone().with_source_contract(source.name.clone()))
            })
            .collect();

        let mut operators: IndexMap<SmolStr, Operator> = IndexMap::new();
        let mut constants: IndexMap<SmolStr, Constant> = IndexMap::new();
        let mut associations = AssociationTable::new();
        let mut enums: Vec<ClassId> = Vec::new();
        let mut structs: Vec<ClassId> = Vec::new();
        let mut seen_types = FxHashSet::default();

        for (position, source) in &chain {
            for op in &source.operators {
                let hash = operator_hash(op);
                operators.entry(hash.clone()).or_insert_with(|| {
                    let mut squashed = op.clone().with_source_contract(source.name.clone());
                    squashed.hash = Some(hash);
                    squashed.inheritance_position = Some(*position);
                    squashed
                });
            }
            for constant in &source.constants {
                constants
                    .entry(constant.name.clone())
                    .or_insert_with(|| Constant {
                        source_contract: Some(source.name.clone()),
                        ..constant.clone()
                    });
            }
            for assoc in source.associations.iter().filter(|a| !a.realization) {
                associations.record(assoc.clone())?;
            }
            enums.extend(source.enums.iter().filter(|e| seen_types.insert(**e)));
            structs.extend(source.structs.iter().filter(|s| seen_types.insert(**s)));
        }

        let mut properties = ClassProperties::new(
            class.name.clone(),
            class.absolute_path.clone(),
            class.relative_path.clone(),
        )
        .with_imported_file_names(class.imported_file_names.iter().cloned())
        .with_imports(class.imports.iter().cloned())
        .with_enums(enums)
        .with_structs(structs)
        .with_attributes(attributes)
        .with_operators(operators.into_values())
        .with_constants(constants.into_values())
        .with_associations(associations);
        properties.stereotype = class.stereotype;
        properties.parent_id = class.parent_id;

        let squashed = UmlClass::with_allocator(properties, self.allocator())?;
        debug!(
            class = %class.name,
            ancestors = chain.len() - 1,
            attributes = squashed.attributes.len(),
            operators = squashed.operators.len(),
            "[SQUASH] squashed class"
        );
        Ok(squashed)
    }
}
