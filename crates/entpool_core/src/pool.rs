//! # Component Pool
//!
//! A storage plus three lifecycle signals.
//!
//! ```text
//!                 ┌──────────────────────────────────────┐
//!  emplace ──────>│ storage.emplace ──> construction(o,e) │
//!  insert  ──────>│ storage.insert  ──> construction × N  │
//!  patch   ──────>│ storage.patch   ──> update(o,e)       │
//!  erase   ──────>│ destruction(o,e) ──> storage.erase    │
//!                 └──────────────────────────────────────┘
//! ```
//!
//! Construction and update fire after the storage changed; destruction fires
//! while the component is still readable.
//!
//! ## Reentrancy
//!
//! Every operation takes `&self`. The storage lives in a `RefCell` whose
//! borrow is released before any signal is published, so a listener handed
//! the owner may call back into this very pool (emplace another entity, erase
//! the one being announced, connect more listeners...).
//!
//! Two things must not touch the pool while they run, or the `RefCell` will
//! panic on a double borrow:
//! - mutators passed to `patch`
//! - `Drop` impls of the component type
//!
//! Handles returned by `emplace`/`patch` for value storages are
//! `Option<RefMut>` guards; drop them before the next pool call. They are
//! `None` when a listener removed the entity before the call returned.

use std::any::type_name;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use entpool_signal::{Signal, Sink};

use crate::access::PoolView;
use crate::component::ComponentPool;
use crate::config::PoolConfig;
use crate::error::PoolResult;
use crate::entity::Entity;
use crate::mutate::Mutators;
use crate::storage::{Storage, ValueStorage};

/// Storage of one component type with lifecycle notifications.
///
/// # Type Parameters
///
/// * `E` - Entity identifier
/// * `S` - Storage layout (`SparseSet` for data, `TagSet` for tags)
/// * `R` - Owner handed to listeners, usually the registry
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use entpool_core::{Pool, SparseSet};
///
/// let pool: Pool<u32, SparseSet<u32, f32>, ()> = Pool::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&seen);
/// let _conn = pool.on_construct().connect(move |_: &mut (), _| counter.set(counter.get() + 1));
///
/// if let Some(mut value) = pool.emplace(&mut (), 1, 0.5) {
///     *value += 1.0;
/// }
/// pool.insert(&mut (), &[2, 3], 0.0);
///
/// assert_eq!(seen.get(), 3);
/// assert_eq!(*pool.get(1).unwrap(), 1.5);
/// ```
pub struct Pool<E, S, R: ?Sized> {
    storage: RefCell<S>,
    construction: Signal<R, E>,
    update: Signal<R, E>,
    destruction: Signal<R, E>,
}

impl<E, S, R> Pool<E, S, R>
where
    E: Entity,
    S: Storage<E> + 'static,
    R: ?Sized,
{
    /// Creates an empty pool with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(S::default())
    }

    /// Creates an empty pool sized by `config`.
    ///
    /// # Panics
    ///
    /// If `config.page_size` is not a power of two. Use
    /// [`Pool::try_with_config`] for configurations that were not validated.
    #[must_use]
    pub fn with_config(config: &PoolConfig) -> Self {
        Self::with_storage(S::with_config(config))
    }

    /// Validates `config`, then creates an empty pool sized by it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PoolError::InvalidConfig`] if `config` fails
    /// [`PoolConfig::validate`].
    pub fn try_with_config(config: &PoolConfig) -> PoolResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Wraps an existing storage. No signal is published for entities it
    /// already holds.
    #[must_use]
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage: RefCell::new(storage),
            construction: Signal::new(),
            update: Signal::new(),
            destruction: Signal::new(),
        }
    }

    /// Sink for listeners run **after** a component is assigned.
    #[inline]
    #[must_use]
    pub fn on_construct(&self) -> Sink<'_, R, E> {
        self.construction.sink()
    }

    /// Sink for listeners run **after** a component is patched.
    #[inline]
    #[must_use]
    pub fn on_update(&self) -> Sink<'_, R, E> {
        self.update.sink()
    }

    /// Sink for listeners run **before** a component is removed.
    #[inline]
    #[must_use]
    pub fn on_destroy(&self) -> Sink<'_, R, E> {
        self.destruction.sink()
    }

    /// Number of entities in the pool.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    /// `true` if the pool holds no entity.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.borrow().is_empty()
    }

    /// `true` if `entity` has a component in this pool.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: E) -> bool {
        self.storage.borrow().contains(entity)
    }

    /// Entities in iteration order.
    ///
    /// The returned guard borrows the storage; mutating the pool while it is
    /// alive panics.
    #[must_use]
    pub fn entities(&self) -> Ref<'_, [E]> {
        Ref::map(self.storage.borrow(), |storage| storage.entities())
    }

    /// Read access to the underlying storage.
    #[must_use]
    pub fn storage(&self) -> Ref<'_, S> {
        self.storage.borrow()
    }

    /// Read-only view of this pool.
    #[must_use]
    pub fn view(&self) -> PoolView<'_, E, R, Self> {
        PoolView::new(self)
    }

    /// Reserves room for at least `additional` more entities.
    pub fn reserve(&self, additional: usize) {
        self.storage.borrow_mut().reserve(additional);
    }

    /// Assigns `value` to `entity`, then publishes construction.
    ///
    /// # Returns
    ///
    /// A guard over the new value for value storages, or `None` if a
    /// construction listener removed `entity` again. `()` for tags.
    ///
    /// # Panics
    ///
    /// In debug builds, if `entity` already belongs to the pool.
    pub fn emplace(&self, owner: &mut R, entity: E, value: S::Value) -> S::Handle<'_> {
        self.storage.borrow_mut().emplace(entity, value);
        self.construction.publish(owner, entity);
        S::handle(&self.storage, entity)
    }

    /// Like [`Pool::emplace`], building the value with `make`.
    pub fn emplace_with<F>(&self, owner: &mut R, entity: E, make: F) -> S::Handle<'_>
    where
        F: FnOnce() -> S::Value,
    {
        self.emplace(owner, entity, make())
    }

    /// Like [`Pool::emplace`] with a fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns whatever `make` returns; the pool is left untouched and no
    /// signal is published.
    pub fn try_emplace_with<F, Err>(&self, owner: &mut R, entity: E, make: F) -> Result<S::Handle<'_>, Err>
    where
        F: FnOnce() -> Result<S::Value, Err>,
    {
        let value = make()?;
        Ok(self.emplace(owner, entity, value))
    }

    /// Assigns a copy of `value` to every entity in `entities`.
    ///
    /// The storage is updated in one batch first. Construction is then
    /// published once per entity in slice order, and only if at least one
    /// listener is connected.
    ///
    /// Copies are cloned straight into the storage, so `Clone` must not call
    /// back into this pool. If a clone panics, nothing is inserted.
    ///
    /// # Panics
    ///
    /// In debug builds, if an entity already belongs to the pool or appears
    /// twice.
    pub fn insert(&self, owner: &mut R, entities: &[E], value: S::Value)
    where
        S::Value: Clone,
    {
        let values = std::iter::repeat(value).take(entities.len());
        self.insert_values(owner, entities, values);
    }

    /// Batch insert with one value per entity built by `make`.
    ///
    /// Every value is built before the storage is touched, so `make` may read
    /// the pool. If `make` panics, nothing is inserted.
    pub fn insert_with<F>(&self, owner: &mut R, entities: &[E], make: F)
    where
        F: FnMut(E) -> S::Value,
    {
        let values: Vec<_> = entities.iter().copied().map(make).collect();
        self.insert_values(owner, entities, values);
    }

    /// Batch insert with a fallible constructor.
    ///
    /// Every value is built before the storage is touched.
    ///
    /// # Errors
    ///
    /// Returns the first error of `make`; nothing is inserted and no signal
    /// is published.
    pub fn try_insert_with<F, Err>(&self, owner: &mut R, entities: &[E], make: F) -> Result<(), Err>
    where
        F: FnMut(E) -> Result<S::Value, Err>,
    {
        let values = entities.iter().copied().map(make).collect::<Result<Vec<_>, Err>>()?;
        self.insert_values(owner, entities, values);
        Ok(())
    }

    fn insert_values<I>(&self, owner: &mut R, entities: &[E], values: I)
    where
        I: IntoIterator<Item = S::Value>,
    {
        self.storage.borrow_mut().insert(entities, values);

        tracing::trace!(
            component = type_name::<S::Value>(),
            count = entities.len(),
            listeners = self.construction.len(),
            "batch insert"
        );

        if !self.construction.is_empty() {
            self.construction.publish_each(owner, entities.iter().copied());
        }
    }

    /// Publishes destruction for `entity`, then removes it.
    ///
    /// # Panics
    ///
    /// If `entity` does not belong to the pool by the time listeners ran.
    pub fn erase(&self, owner: &mut R, entity: E) {
        self.destruction.publish(owner, entity);
        self.storage.borrow_mut().erase(entity);
    }

    /// Removes every entity in `entities`.
    ///
    /// If `entities` covers the whole pool, destruction is published for the
    /// current entities in iteration order (when listened to) and the storage
    /// is cleared in one go. Otherwise each entity goes through
    /// [`Pool::erase`].
    ///
    /// # Panics
    ///
    /// In debug builds, if an entity is missing from the pool.
    pub fn erase_many(&self, owner: &mut R, entities: &[E]) {
        if entities.len() == self.len() {
            debug_assert!(
                entities.iter().all(|&entity| self.contains(entity)),
                "erase_many over entities missing from the pool"
            );
            self.clear(owner);
        } else {
            tracing::trace!(
                component = type_name::<S::Value>(),
                count = entities.len(),
                "erasing entities one by one"
            );
            for &entity in entities {
                self.erase(owner, entity);
            }
        }
    }

    /// Removes every entity, publishing destruction first for each one.
    pub fn clear(&self, owner: &mut R) {
        if !self.destruction.is_empty() {
            let current = self.storage.borrow().entities().to_vec();
            self.destruction.publish_each(owner, current);
        }

        tracing::trace!(component = type_name::<S::Value>(), count = self.len(), "clearing pool");
        self.storage.borrow_mut().clear();
    }

    /// Erases `entity` if it belongs to the pool.
    ///
    /// # Returns
    ///
    /// `true` if the entity was erased.
    pub fn remove(&self, owner: &mut R, entity: E) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.erase(owner, entity);
        true
    }

    /// Applies `mutators` in order to the component of `entity`, then
    /// publishes update.
    ///
    /// Value storages return `None` if an update listener removed `entity`.
    ///
    /// Tag storages never call the mutators but still publish, which makes
    /// `patch(owner, entity, ())` a way to announce an update without data.
    ///
    /// # Panics
    ///
    /// If `entity` does not belong to the pool.
    pub fn patch<M>(&self, owner: &mut R, entity: E, mutators: M) -> S::Handle<'_>
    where
        M: Mutators<S::Value>,
    {
        self.storage.borrow_mut().patch(entity, mutators);
        self.update.publish(owner, entity);
        S::handle(&self.storage, entity)
    }

    /// [`Pool::patch`] with a single mutator.
    pub fn patch_with<F>(&self, owner: &mut R, entity: E, mutator: F) -> S::Handle<'_>
    where
        F: FnOnce(&mut S::Value),
    {
        self.patch(owner, entity, (mutator,))
    }

    /// Overwrites the component of `entity` and publishes update.
    pub fn replace(&self, owner: &mut R, entity: E, value: S::Value) -> S::Handle<'_> {
        self.patch(owner, entity, (move |slot: &mut S::Value| *slot = value,))
    }

    /// [`Pool::replace`] if `entity` is present, [`Pool::emplace`] otherwise.
    pub fn emplace_or_replace(&self, owner: &mut R, entity: E, value: S::Value) -> S::Handle<'_> {
        if self.contains(entity) {
            self.replace(owner, entity, value)
        } else {
            self.emplace(owner, entity, value)
        }
    }
}

impl<E, S, R> Pool<E, S, R>
where
    E: Entity,
    S: ValueStorage<E> + 'static,
    R: ?Sized,
{
    /// Component of `entity`, if present.
    #[must_use]
    pub fn get(&self, entity: E) -> Option<Ref<'_, S::Value>> {
        Ref::filter_map(self.storage.borrow(), |storage| storage.get(entity)).ok()
    }

    /// Mutable component of `entity`, if present. No signal is published.
    #[must_use]
    pub fn get_mut(&self, entity: E) -> Option<RefMut<'_, S::Value>> {
        RefMut::filter_map(self.storage.borrow_mut(), |storage| storage.get_mut(entity)).ok()
    }

    /// Calls `f` for every `(entity, component)` in iteration order.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(E, &S::Value),
    {
        let storage = self.storage.borrow();
        for (&entity, value) in storage.entities().iter().zip(storage.values()) {
            f(entity, value);
        }
    }
}

impl<E, S, R> Default for Pool<E, S, R>
where
    E: Entity,
    S: Storage<E> + 'static,
    R: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S, R> fmt::Debug for Pool<E, S, R>
where
    E: Entity,
    S: Storage<E> + 'static,
    R: ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("component", &type_name::<S::Value>())
            .field("len", &self.len())
            .field("construction", &self.construction)
            .field("update", &self.update)
            .field("destruction", &self.destruction)
            .finish()
    }
}

impl<E, S, R> ComponentPool<E, R> for Pool<E, S, R>
where
    E: Entity,
    S: Storage<E> + 'static,
    R: ?Sized,
{
    type Value = S::Value;
    type Handle<'a> = S::Handle<'a> where Self: 'a;

    fn len(&self) -> usize {
        Pool::len(self)
    }

    fn contains(&self, entity: E) -> bool {
        Pool::contains(self, entity)
    }

    fn entities(&self) -> Ref<'_, [E]> {
        Pool::entities(self)
    }

    fn emplace(&self, owner: &mut R, entity: E, value: S::Value) -> S::Handle<'_> {
        Pool::emplace(self, owner, entity, value)
    }

    fn insert(&self, owner: &mut R, entities: &[E], value: S::Value)
    where
        S::Value: Clone,
    {
        Pool::insert(self, owner, entities, value);
    }

    fn erase(&self, owner: &mut R, entity: E) {
        Pool::erase(self, owner, entity);
    }

    fn erase_many(&self, owner: &mut R, entities: &[E]) {
        Pool::erase_many(self, owner, entities);
    }

    fn patch<M: Mutators<S::Value>>(&self, owner: &mut R, entity: E, mutators: M) -> S::Handle<'_> {
        Pool::patch(self, owner, entity, mutators)
    }

    fn on_construct(&self) -> Sink<'_, R, E> {
        Pool::on_construct(self)
    }

    fn on_update(&self) -> Sink<'_, R, E> {
        Pool::on_update(self)
    }

    fn on_destroy(&self) -> Sink<'_, R, E> {
        Pool::on_destroy(self)
    }
}
