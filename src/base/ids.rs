//! Class identifiers and the allocator that hands them out.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique identifier for a UML class within one analysis run.
/// Uses u32 for compact storage (supports ~4 billion classes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassId(pub u32);

impl ClassId {
    /// Create a new ClassId from a raw value
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value as an index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing [`ClassId`]s.
///
/// Allocation is a single `fetch_add`, so one allocator can be shared by
/// reference across threads parsing different files without ever handing out
/// the same id twice.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU32,
}

static GLOBAL: IdAllocator = IdAllocator::starting_at(0);

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    pub const fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Process-wide allocator backing [`UmlClass::new`](crate::model::UmlClass::new).
    pub fn global() -> &'static IdAllocator {
        &GLOBAL
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> ClassId {
        ClassId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> ClassId {
        ClassId(self.next.load(Ordering::Relaxed))
    }
}
