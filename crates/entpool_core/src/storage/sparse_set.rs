//! Sparse set with a packed value array.

use std::cell::{RefCell, RefMut};
use std::fmt;

use super::entity_set::EntitySet;
use super::{Storage, ValueStorage};
use crate::config::PoolConfig;
use crate::entity::Entity;
use crate::mutate::Mutators;

/// Dense storage for components that carry data.
///
/// `values[i]` belongs to `entities()[i]`; both arrays are permuted together
/// on removal.
///
/// # Example
///
/// ```rust
/// use entpool_core::{SparseSet, Storage, ValueStorage};
///
/// let mut storage: SparseSet<u32, &str> = SparseSet::new();
/// storage.emplace(4, "four");
/// storage.emplace(2, "two");
///
/// assert_eq!(storage.get(2), Some(&"two"));
/// assert_eq!(storage.entities(), &[4, 2]);
/// ```
pub struct SparseSet<E, T> {
    set: EntitySet<E>,
    values: Vec<T>,
}

impl<E: Entity, T> SparseSet<E, T> {
    /// Creates an empty storage with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&PoolConfig::default())
    }

    /// Iterates `(entity, value)` pairs in packed order.
    pub fn iter(&self) -> impl Iterator<Item = (E, &T)> {
        self.set.entities().iter().copied().zip(self.values.iter())
    }

    /// Iterates `(entity, value)` pairs mutably in packed order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (E, &mut T)> {
        self.set.entities().iter().copied().zip(self.values.iter_mut())
    }

    /// Removes `entity` and returns its value, if present.
    pub fn remove(&mut self, entity: E) -> Option<T> {
        if !self.set.contains(entity) {
            return None;
        }
        let position = self.set.swap_remove(entity);
        Some(self.values.swap_remove(position))
    }

    fn slot_mut(&mut self, entity: E) -> &mut T {
        let Some(position) = self.set.position(entity) else {
            panic!("entity {entity:?} does not belong to the storage");
        };
        &mut self.values[position]
    }
}

/// Truncates `values` back to `len` unless disarmed by moving `len` forward.
struct Rollback<'a, T> {
    values: &'a mut Vec<T>,
    len: usize,
}

impl<T> Drop for Rollback<'_, T> {
    fn drop(&mut self) {
        self.values.truncate(self.len);
    }
}

impl<E: Entity, T> Storage<E> for SparseSet<E, T> {
    type Value = T;
    type Handle<'a> = Option<RefMut<'a, T>> where Self: 'a;

    fn with_config(config: &PoolConfig) -> Self {
        Self {
            set: EntitySet::new(config.page_size, config.reserve),
            values: Vec::with_capacity(config.reserve),
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
        self.values.reserve(additional);
    }

    fn emplace(&mut self, entity: E, value: T) {
        self.set.push(entity);
        self.values.push(value);
    }

    fn insert<I>(&mut self, entities: &[E], values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.reserve(entities.len());

        // Values first: a panicking producer must not leave entities behind.
        let mut rollback = Rollback {
            len: self.values.len(),
            values: &mut self.values,
        };
        rollback.values.extend(values);
        assert_eq!(
            rollback.values.len() - rollback.len,
            entities.len(),
            "one value per entity"
        );
        rollback.len = rollback.values.len();
        drop(rollback);

        for &entity in entities {
            self.set.push(entity);
        }
    }

    fn erase(&mut self, entity: E) {
        let position = self.set.swap_remove(entity);
        self.values.swap_remove(position);
    }

    fn clear(&mut self) {
        self.set.clear();
        self.values.clear();
    }

    fn patch<M: Mutators<T>>(&mut self, entity: E, mutators: M) {
        mutators.apply(self.slot_mut(entity));
    }

    fn handle(cell: &RefCell<Self>, entity: E) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(cell.borrow_mut(), |storage| storage.get_mut(entity)).ok()
    }
}

impl<E: Entity, T> ValueStorage<E> for SparseSet<E, T> {
    #[inline]
    fn get(&self, entity: E) -> Option<&T> {
        self.set.position(entity).map(|position| &self.values[position])
    }

    #[inline]
    fn get_mut(&mut self, entity: E) -> Option<&mut T> {
        self.set.position(entity).map(|position| &mut self.values[position])
    }

    #[inline]
    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<E: Entity, T> Default for SparseSet<E, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity, T: fmt::Debug> fmt::Debug for SparseSet<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    fn position(x: f32) -> Position {
        Position { x, y: 0.0 }
    }

    #[test]
    fn test_emplace_get() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        storage.emplace(10, position(1.0));

        assert!(storage.contains(10));
        assert_eq!(storage.get(10), Some(&position(1.0)));
        assert_eq!(storage.get(11), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_erase_keeps_values_aligned() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        for entity in 0..4 {
            storage.emplace(entity, position(entity as f32));
        }

        storage.erase(1);

        assert_eq!(storage.entities(), &[0, 3, 2]);
        for (entity, value) in storage.iter() {
            assert!((value.x - entity as f32).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_batch_insert() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        storage.insert(&[5, 6, 7], vec![position(5.0); 3]);

        assert_eq!(storage.len(), 3);
        assert_eq!(storage.values().len(), 3);
        assert!(storage.contains(6));
    }

    #[test]
    fn test_patch_applies_in_order() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        storage.emplace(1, position(1.0));

        storage.patch(1, (|p: &mut Position| p.x += 1.0, |p: &mut Position| p.x *= 3.0));

        assert!((storage.get(1).unwrap().x - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_remove_returns_value() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        storage.emplace(2, position(2.0));

        assert_eq!(storage.remove(2), Some(position(2.0)));
        assert_eq!(storage.remove(2), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_handle_borrows_value() {
        let cell = RefCell::new(SparseSet::<u32, Position>::new());
        cell.borrow_mut().emplace(3, position(0.0));

        SparseSet::handle(&cell, 3).unwrap().y = 9.0;

        assert!((cell.borrow().get(3).unwrap().y - 9.0).abs() < f32::EPSILON);
        assert!(SparseSet::handle(&cell, 4).is_none());
    }

    #[test]
    fn test_insert_rolls_back_on_panic() {
        let mut storage: SparseSet<u32, Position> = SparseSet::new();
        storage.emplace(1, position(1.0));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            storage.insert(
                &[2, 3, 4],
                (2..5).map(|entity| {
                    assert!(entity != 4, "cannot build {entity}");
                    position(entity as f32)
                }),
            );
        }));

        assert!(result.is_err());
        assert_eq!(storage.entities(), &[1]);
        assert_eq!(storage.values().len(), 1);
        assert!(!storage.contains(2));
    }

    #[test]
    fn test_clear() {
        let mut storage: SparseSet<u32, Position> = SparseSet::with_config(&PoolConfig {
            reserve: 16,
            page_size: 8,
        });
        for entity in 0..16 {
            storage.emplace(entity, position(0.0));
        }

        storage.clear();

        assert!(storage.is_empty());
        assert!(storage.values().is_empty());
        assert!(!storage.contains(3));
    }
}
