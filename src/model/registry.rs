//! Central class table for one analysis run.
//!
//! Classes refer to each other only through ids (`parent_id`, `enums`,
//! `structs`) and names (association targets). The registry owns every class
//! and turns those weak references back into classes.
//!
//! ```text
//! ClassRegistry
//! ├── ids:     IdAllocator                      (one counter per run)
//! ├── classes: FxHashMap<ClassId, UmlClass>
//! └── names:   FxHashMap<SmolStr, Vec<ClassId>>  (same name may exist in many files)
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::association::{Association, MergeOutcome};
use super::class::{ClassProperties, UmlClass};
use super::error::{ModelError, ModelResult};
use crate::base::{ClassId, IdAllocator};

/// A registry shared between threads that populate it file by file.
pub type SharedRegistry = Arc<RwLock<ClassRegistry>>;

/// Owns all classes of a run and resolves references between them.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    ids: IdAllocator,
    classes: FxHashMap<ClassId, UmlClass>,
    names: FxHashMap<SmolStr, Vec<ClassId>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose first class id is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self {
            ids: IdAllocator::starting_at(first),
            ..Self::default()
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    // ========================================================================
    // POPULATION
    // ========================================================================

    /// Construct a class with the next id of this registry and store it.
    pub fn create(&mut self, properties: ClassProperties) -> ModelResult<ClassId> {
        let class = UmlClass::with_allocator(properties, &self.ids)?;
        let id = class.id();
        debug!(id = %id, name = %class.name, "[REGISTRY] created class");
        self.insert(class)?;
        Ok(id)
    }

    /// Store a class built elsewhere.
    ///
    /// Classes from different allocators may share ids. A class is never
    /// replaced, so an id that is already stored fails with `DuplicateId`
    /// and the registry is left as it was.
    pub fn insert(&mut self, class: UmlClass) -> ModelResult<ClassId> {
        let id = class.id();
        if self.classes.contains_key(&id) {
            return Err(ModelError::DuplicateId(id));
        }
        let ids = self.names.entry(class.name.clone()).or_default();
        let pos = ids.partition_point(|other| *other < id);
        ids.insert(pos, id);
        self.classes.insert(id, class);
        Ok(id)
    }

    /// Record an association on the class `from`.
    pub fn add_association(
        &mut self,
        from: ClassId,
        association: Association,
    ) -> ModelResult<MergeOutcome> {
        self.classes
            .get_mut(&from)
            .ok_or(ModelError::UnknownClass(from))?
            .add_association(association)
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    pub fn get(&self, id: ClassId) -> Option<&UmlClass> {
        self.classes.get(&id)
    }

    pub fn get_mut(&mut self, id: ClassId) -> Option<&mut UmlClass> {
        self.classes.get_mut(&id)
    }

    /// All classes with this name, lowest id first.
    pub fn by_name(&self, name: &str) -> Vec<&UmlClass> {
        self.names
            .get(name)
            .map(|ids| ids.iter().filter_map(|id| self.classes.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn first_by_name(&self, name: &str) -> Option<&UmlClass> {
        self.names
            .get(name)
            .and_then(|ids| ids.first())
            .and_then(|id| self.classes.get(id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &UmlClass> {
        let mut ids: Vec<ClassId> = self.classes.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.classes.get(&id))
    }

    // ========================================================================
    // REFERENCE RESOLUTION
    // ========================================================================

    /// Containing class of a nested struct or enum.
    pub fn parent_of(&self, id: ClassId) -> Option<&UmlClass> {
        self.get(id)?.parent_id.and_then(|parent| self.get(parent))
    }

    /// Structs declared inside `id`. Ids with no stored class are skipped.
    pub fn nested_structs(&self, id: ClassId) -> Vec<&UmlClass> {
        self.get(id)
            .map(|class| class.structs.iter().filter_map(|s| self.get(*s)).collect())
            .unwrap_or_default()
    }

    /// Enums declared inside `id`. Ids with no stored class are skipped.
    pub fn nested_enums(&self, id: ClassId) -> Vec<&UmlClass> {
        self.get(id)
            .map(|class| class.enums.iter().filter_map(|e| self.get(*e)).collect())
            .unwrap_or_default()
    }

    /// Find the class an association of `from` points at.
    ///
    /// When several classes share the target name, prefers the one nested in
    /// the association's parent class, then one in the same file as `from`,
    /// then the lowest id.
    pub fn association_target(
        &self,
        association: &Association,
        from: &UmlClass,
    ) -> Option<&UmlClass> {
        let candidates = self.by_name(association.target());
        if candidates.len() <= 1 {
            return candidates.into_iter().next();
        }

        if let Some(parent_name) = &association.parent_uml_class_name {
            let nested = candidates.iter().find(|c| {
                c.parent_id
                    .and_then(|p| self.get(p))
                    .is_some_and(|p| p.name == *parent_name)
            });
            if let Some(found) = nested {
                return Some(*found);
            }
        }

        candidates
            .iter()
            .find(|c| c.absolute_path == from.absolute_path)
            .or_else(|| candidates.first())
            .copied()
    }

    /// Every class `id` inherits from, directly or transitively.
    ///
    /// Its [`linearize`](Self::linearize) order without `id` itself: most
    /// derived first, each ancestor once. Unresolvable parents are skipped.
    pub fn ancestors(&self, id: ClassId) -> ModelResult<Vec<ClassId>> {
        let mut order = self.linearize(id)?;
        order.remove(0);
        Ok(order)
    }
}

impl ClassRegistry {
    /// C3 linearization of class `id`, most derived first.
    ///
    /// Starts with `id` itself. Parents are taken in the order their
    /// realizations were recorded, and those listed later in `contract A is B, C`
    /// are more derived, so `C` precedes `B`, and every class precedes all of
    /// its bases. Unresolvable parents are skipped; inheritance cycles are cut
    /// with a warning, and an inconsistent hierarchy falls back to the first
    /// remaining head.
    pub fn linearize(&self, id: ClassId) -> ModelResult<Vec<ClassId>> {
        if !self.classes.contains_key(&id) {
            return Err(ModelError::UnknownClass(id));
        }
        let mut memo = FxHashMap::default();
        let mut stack = Vec::new();
        Ok(self.linearize_inner(id, &mut stack, &mut memo))
    }

    fn linearize_inner(
        &self,
        id: ClassId,
        stack: &mut Vec<ClassId>,
        memo: &mut FxHashMap<ClassId, Vec<ClassId>>,
    ) -> Vec<ClassId> {
        if let Some(done) = memo.get(&id) {
            return done.clone();
        }
        let Some(class) = self.get(id) else {
            return Vec::new();
        };

        stack.push(id);
        let mut parents: Vec<ClassId> = Vec::new();
        for parent in class.parent_contracts() {
            let Some(target) = self.association_target(parent, class) else {
                continue;
            };
            let target_id = target.id();
            if stack.contains(&target_id) {
                warn!(
                    class = %class.name,
                    parent = %target.name,
                    "[REGISTRY] inheritance cycle, skipping parent"
                );
                continue;
            }
            if !parents.contains(&target_id) {
                parents.push(target_id);
            }
        }

        // Rightmost parent is the most derived.
        let mut sequences: Vec<Vec<ClassId>> = parents
            .iter()
            .rev()
            .map(|parent| self.linearize_inner(*parent, stack, memo))
            .filter(|seq| !seq.is_empty())
            .collect();
        sequences.push(parents.iter().rev().copied().collect());
        stack.pop();

        let mut result = vec![id];
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                break;
            }
            let next = sequences
                .iter()
                .map(|seq| seq[0])
                .find(|head| !sequences.iter().any(|seq| seq[1..].contains(head)))
                .unwrap_or_else(|| {
                    warn!(class = %class.name, "[REGISTRY] inconsistent linearization");
                    sequences[0][0]
                });
            result.push(next);
            for seq in &mut sequences {
                seq.retain(|other| *other != next);
            }
        }

        memo.insert(id, result.clone());
        result
    }
}
