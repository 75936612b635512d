//! Paged sparse index plus packed entity array.
//!
//! ```text
//! sparse pages:  [page 0] [ None ] [page 2] ...   entity.sparse_index() -> position
//! packed:        [e3, e9, e1, ...]                position -> entity
//! ```
//!
//! Removal swaps the last packed entity into the hole, so positions stay
//! dense and iteration touches only live entities.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::entity::Entity;

/// Sentinel for a sparse slot without an entity.
const EMPTY: usize = usize::MAX;

pub(crate) struct EntitySet<E> {
    sparse: Vec<Option<Box<[usize]>>>,
    packed: Vec<E>,
    page_size: usize,
}

impl<E: Entity> EntitySet<E> {
    pub(crate) fn new(page_size: usize, reserve: usize) -> Self {
        assert!(page_size.is_power_of_two(), "page size must be a power of two");
        Self {
            sparse: Vec::new(),
            packed: Vec::with_capacity(reserve),
            page_size,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.packed.len()
    }

    #[inline]
    pub(crate) fn entities(&self) -> &[E] {
        &self.packed
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.packed.reserve(additional);
    }

    #[inline]
    fn locate(&self, entity: E) -> (usize, usize) {
        let index = entity.sparse_index();
        (index / self.page_size, index & (self.page_size - 1))
    }

    /// Packed position of `entity`, if present.
    #[inline]
    pub(crate) fn position(&self, entity: E) -> Option<usize> {
        let (page, offset) = self.locate(entity);
        let position = *self.sparse.get(page)?.as_ref()?.get(offset)?;
        (self.packed.get(position) == Some(&entity)).then_some(position)
    }

    #[inline]
    pub(crate) fn contains(&self, entity: E) -> bool {
        self.position(entity).is_some()
    }

    fn slot_mut(&mut self, entity: E) -> &mut usize {
        let (page, offset) = self.locate(entity);
        if page >= self.sparse.len() {
            self.sparse.resize_with(page + 1, || None);
        }

        let page_size = self.page_size;
        let page = self.sparse[page].get_or_insert_with(|| vec![EMPTY; page_size].into_boxed_slice());
        &mut page[offset]
    }

    /// Appends `entity` and returns its packed position.
    pub(crate) fn push(&mut self, entity: E) -> usize {
        debug_assert!(!self.contains(entity), "entity {entity:?} already belongs to the storage");
        let position = self.packed.len();
        *self.slot_mut(entity) = position;
        self.packed.push(entity);
        position
    }

    /// Removes `entity` by swapping the last one into its place.
    ///
    /// Returns the packed position that was vacated; callers keeping parallel
    /// arrays must `swap_remove` the same position.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is not in the set.
    pub(crate) fn swap_remove(&mut self, entity: E) -> usize {
        let Some(position) = self.position(entity) else {
            panic!("entity {entity:?} does not belong to the storage");
        };

        self.packed.swap_remove(position);
        if let Some(&moved) = self.packed.get(position) {
            *self.slot_mut(moved) = position;
        }
        *self.slot_mut(entity) = EMPTY;

        position
    }

    /// Removes every entity. O(entries); sparse pages are kept.
    pub(crate) fn clear(&mut self) {
        let packed = std::mem::take(&mut self.packed);
        for &entity in &packed {
            *self.slot_mut(entity) = EMPTY;
        }
        self.packed = packed;
        self.packed.clear();
    }
}

impl<E: Entity> Default for EntitySet<E> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}
