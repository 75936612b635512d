//! Sparse set for zero-size components.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use super::entity_set::EntitySet;
use super::Storage;
use crate::config::PoolConfig;
use crate::entity::Entity;
use crate::mutate::Mutators;

/// Storage for tag components: presence is the only information.
///
/// No value is ever kept. Emplaced values are dropped immediately, `patch`
/// drops its mutators without calling them, and the handle is `()`. Since the
/// handle reads nothing, a listener may remove the entity before it is built.
///
/// Components with a size are rejected at compile time:
///
/// ```compile_fail
/// use entpool_core::TagSet;
///
/// let _tags: TagSet<u32, u64> = TagSet::new();
/// ```
pub struct TagSet<E, T> {
    set: EntitySet<E>,
    _marker: PhantomData<fn() -> T>,
}

impl<E: Entity, T> TagSet<E, T> {
    const ZERO_SIZED: () = assert!(
        std::mem::size_of::<T>() == 0,
        "tag storage only holds zero-size components"
    );

    /// Creates an empty storage with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&PoolConfig::default())
    }

    /// Iterates tagged entities in packed order.
    pub fn iter(&self) -> impl Iterator<Item = E> + '_ {
        self.set.entities().iter().copied()
    }
}

impl<E: Entity, T> Storage<E> for TagSet<E, T> {
    type Value = T;
    type Handle<'a> = () where Self: 'a;

    fn with_config(config: &PoolConfig) -> Self {
        let () = Self::ZERO_SIZED;
        Self {
            set: EntitySet::new(config.page_size, config.reserve),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    fn contains(&self, entity: E) -> bool {
        self.set.contains(entity)
    }

    #[inline]
    fn entities(&self) -> &[E] {
        self.set.entities()
    }

    fn reserve(&mut self, additional: usize) {
        self.set.reserve(additional);
    }

    fn emplace(&mut self, entity: E, _value: T) {
        self.set.push(entity);
    }

    fn insert<I>(&mut self, entities: &[E], values: I)
    where
        I: IntoIterator<Item = T>,
    {
        // Drain the values before touching the set so a panicking producer
        // leaves nothing behind.
        let count = values.into_iter().count();
        assert_eq!(count, entities.len(), "one value per entity");
        self.set.reserve(entities.len());
        for &entity in entities {
            self.set.push(entity);
        }
    }

    fn erase(&mut self, entity: E) {
        self.set.swap_remove(entity);
    }

    fn clear(&mut self) {
        self.set.clear();
    }

    fn patch<M: Mutators<T>>(&mut self, entity: E, _mutators: M) {
        debug_assert!(self.set.contains(entity), "entity {entity:?} does not belong to the storage");
    }

    fn handle(_cell: &RefCell<Self>, _entity: E) {}
}

impl<E: Entity, T> Default for TagSet<E, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity, T> fmt::Debug for TagSet<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
