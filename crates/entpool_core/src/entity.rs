//! # Entity Identifiers
//!
//! Pools treat entities as opaque values. The only thing storage needs from
//! an entity is a slot in its sparse index, provided by [`Entity::sparse_index`].
//!
//! [`EntityId`] is the default identifier:
//! - Lower 32 bits: index (sparse slot)
//! - Upper 32 bits: generation counter for detecting stale references
//!
//! `u32` is an entity too, for callers without generations.

use std::fmt::Debug;
use std::hash::Hash;

/// Opaque, totally ordered entity identifier.
///
/// Two identifiers may share a sparse index (a recycled slot with a new
/// generation); storage compares the full value before reporting presence.
///
/// The sparse index sizes the page table, so implementations must keep it
/// within a 32-bit range, as [`EntityId`] and `u32` do. Wider integers are
/// not entities:
///
/// ```compile_fail
/// use entpool_core::{Pool, SparseSet};
///
/// let _pool: Pool<u64, SparseSet<u64, i32>, ()> = Pool::new();
/// ```
pub trait Entity: Copy + Eq + Ord + Hash + Debug + 'static {
    /// Slot of this entity in a sparse index.
    fn sparse_index(self) -> usize;
}

/// Unique identifier for an entity.
///
/// Ordering compares generation first, then index, following the packed
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Creates a new entity ID from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The index into the sparse array (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the same index with the next generation.
    #[inline]
    #[must_use]
    pub const fn next_generation(self) -> Self {
        Self::new(self.index(), self.generation().wrapping_add(1))
    }

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl Entity for EntityId {
    #[inline]
    fn sparse_index(self) -> usize {
        self.index() as usize
    }
}

impl Entity for u32 {
    #[inline]
    fn sparse_index(self) -> usize {
        self as usize
    }
}
