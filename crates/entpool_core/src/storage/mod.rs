//! # Component Storage
//!
//! Sparse-set containers binding entities to component slots.
//!
//! - O(1) insert, lookup and removal by entity
//! - Packed entity array for contiguous iteration
//! - Removal swaps the last entry into the hole
//!
//! Two layouts are provided:
//!
//! | Storage | Stores values | Handle returned by `emplace`/`patch` |
//! |---|---|---|
//! | [`SparseSet`] | yes | `Option<RefMut<'_, T>>` (`None` once the entity is gone) |
//! | [`TagSet`] | no (zero-size components) | `()` |
//!
//! Pools are generic over [`Storage`], so any container implementing it can be
//! plugged under a pool.

mod entity_set;
mod sparse_set;
mod tag_set;

use std::cell::RefCell;

use crate::config::PoolConfig;
use crate::entity::Entity;
use crate::mutate::Mutators;

pub use sparse_set::SparseSet;
pub use tag_set::TagSet;

/// The container interface a pool is layered on.
///
/// Every method taking an entity that must (or must not) be present treats a
/// violation as a contract error: implementations assert in debug builds and
/// are free to panic in release builds.
pub trait Storage<E: Entity>: Default {
    /// Component type bound to entities.
    type Value;

    /// What a pool hands back from `emplace` and `patch`.
    type Handle<'a>
    where
        Self: 'a;

    /// Creates an empty storage sized by `config`.
    fn with_config(config: &PoolConfig) -> Self;

    /// Number of entities in the storage.
    fn len(&self) -> usize;

    /// `true` if the storage holds no entity.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `entity` is in the storage.
    fn contains(&self, entity: E) -> bool;

    /// Entities in iteration order.
    fn entities(&self) -> &[E];

    /// Reserves room for at least `additional` more entities.
    fn reserve(&mut self, additional: usize);

    /// Binds `value` to `entity`. The entity must be absent.
    fn emplace(&mut self, entity: E, value: Self::Value);

    /// Binds the `i`-th value yielded by `values` to `entities[i]`.
    ///
    /// All entities must be absent and distinct, and `values` must yield
    /// exactly one value per entity. If producing a value panics, the storage
    /// is left as it was before the call.
    fn insert<I>(&mut self, entities: &[E], values: I)
    where
        I: IntoIterator<Item = Self::Value>;

    /// Removes `entity` and drops its value. The entity must be present.
    fn erase(&mut self, entity: E);

    /// Removes every entity at once.
    fn clear(&mut self);

    /// Applies `mutators` to the value bound to `entity`, if the layout stores
    /// one. The entity must be present.
    fn patch<M: Mutators<Self::Value>>(&mut self, entity: E, mutators: M);

    /// Builds the handle for `entity` from the shared cell holding the storage.
    ///
    /// Called after listeners ran, so `entity` may be gone by then.
    fn handle(cell: &RefCell<Self>, entity: E) -> Self::Handle<'_>;
}

/// A storage that keeps one value per entity.
pub trait ValueStorage<E: Entity>: Storage<E> {
    /// Value bound to `entity`, if present.
    fn get(&self, entity: E) -> Option<&Self::Value>;

    /// Mutable value bound to `entity`, if present.
    fn get_mut(&mut self, entity: E) -> Option<&mut Self::Value>;

    /// Values, parallel to [`Storage::entities`].
    fn values(&self) -> &[Self::Value];
}
