//! Associations between classes and the per-class table that deduplicates them.
//!
//! An association points from its owning class to a target class *by name*.
//! The same pair of classes is often related through several code paths
//! (a field of type `Token` and a function parameter of type `Token`), so the
//! table keeps exactly one record per target name and merges later
//! discoveries into it:
//!
//! - the first record for a target is stored as given
//! - a later `Storage` record upgrades the stored kind to `Storage`
//! - nothing ever downgrades `Storage` back to `Memory`
//! - `realization` and `parent_uml_class_name` keep their first value

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::error::{ModelError, ModelResult};
use super::types::ReferenceType;

// ============================================================================
// ASSOCIATION
// ============================================================================

/// A directed relationship from the owning class to `target_uml_class_name`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Association {
    pub reference_type: ReferenceType,
    /// Container of the target when the target is a nested struct or enum.
    pub parent_uml_class_name: Option<SmolStr>,
    pub target_uml_class_name: SmolStr,
    /// Inheritance or interface implementation rather than plain usage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub realization: bool,
}

impl Association {
    /// A usage association.
    pub fn new(target: impl Into<SmolStr>, reference_type: ReferenceType) -> Self {
        Self {
            reference_type,
            target_uml_class_name: target.into(),
            ..Self::default()
        }
    }

    /// An inheritance association (`contract A is B`).
    pub fn realization(target: impl Into<SmolStr>) -> Self {
        Self {
            reference_type: ReferenceType::Storage,
            target_uml_class_name: target.into(),
            realization: true,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<SmolStr>) -> Self {
        self.parent_uml_class_name = Some(parent.into());
        self
    }

    pub fn with_realization(mut self, realization: bool) -> Self {
        self.realization = realization;
        self
    }

    pub fn target(&self) -> &str {
        &self.target_uml_class_name
    }

    pub fn is_realization(&self) -> bool {
        self.realization
    }
}

/// What [`AssociationTable::record`] did with a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First association to this target; stored as given.
    Inserted,
    /// Existing association upgraded from `Memory` to `Storage`.
    Upgraded,
    /// Existing association left as it was.
    Unchanged,
}

// ============================================================================
// ASSOCIATION TABLE
// ============================================================================

/// Associations of one class, keyed by target class name.
///
/// Iterates in insertion order, but callers should not depend on any order.
///
/// Serializes as a map from target name to association. Deserializing replays
/// every entry through [`record`](Self::record), so an empty target or a key
/// that differs from its target name is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "IndexMap<SmolStr, Association>")
)]
pub struct AssociationTable {
    entries: IndexMap<SmolStr, Association>,
}

impl AssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by recording each association in turn.
    ///
    /// Stops at the first association with an empty target.
    pub fn try_from_iter(
        associations: impl IntoIterator<Item = Association>,
    ) -> ModelResult<Self> {
        let mut table = Self::new();
        for association in associations {
            table.record(association)?;
        }
        Ok(table)
    }

    /// Record an association, merging it into any existing one for the same target.
    ///
    /// Fails with `InvalidArgument` when the target name is empty; the table is
    /// not touched in that case.
    pub fn record(&mut self, association: Association) -> ModelResult<MergeOutcome> {
        if association.target_uml_class_name.is_empty() {
            return Err(ModelError::missing_target());
        }

        let Some(existing) = self.entries.get_mut(&association.target_uml_class_name) else {
            trace!(
                target_class = %association.target_uml_class_name,
                reference_type = %association.reference_type,
                realization = association.realization,
                "[ASSOC] inserted"
            );
            self.entries
                .insert(association.target_uml_class_name.clone(), association);
            return Ok(MergeOutcome::Inserted);
        };

        if association.reference_type == ReferenceType::Storage
            && existing.reference_type != ReferenceType::Storage
        {
            existing.reference_type = ReferenceType::Storage;
            trace!(target_class = %existing.target_uml_class_name, "[ASSOC] upgraded to storage");
            Ok(MergeOutcome::Upgraded)
        } else {
            trace!(target_class = %existing.target_uml_class_name, "[ASSOC] duplicate ignored");
            Ok(MergeOutcome::Unchanged)
        }
    }

    pub fn get(&self, target: &str) -> Option<&Association> {
        self.entries.get(target)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.entries.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Association> {
        self.entries.values()
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }

    /// Associations with the realization flag set.
    pub fn realizations(&self) -> impl Iterator<Item = &Association> {
        self.iter().filter(|a| a.realization)
    }
}

impl TryFrom<IndexMap<SmolStr, Association>> for AssociationTable {
    type Error = ModelError;

    fn try_from(entries: IndexMap<SmolStr, Association>) -> ModelResult<Self> {
        let mut table = Self::new();
        for (key, association) in entries {
            if key != association.target_uml_class_name {
                return Err(ModelError::mismatched_target());
            }
            table.record(association)?;
        }
        Ok(table)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AssociationTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.entries, serializer)
    }
}

impl<'a> IntoIterator for &'a AssociationTable {
    type Item = &'a Association;
    type IntoIter = indexmap::map::Values<'a, SmolStr, Association>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
