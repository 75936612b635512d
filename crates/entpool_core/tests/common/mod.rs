//! Shared fixtures: a minimal registry owning one pool per component type,
//! and a storage that counts the calls it receives.

#![allow(dead_code)]

use std::any::{Any, TypeId};
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use entpool_core::{
    declare_component, Component, Entity, EntityId, Mutators, Pool, PoolConfig, PoolOf, SparseSet, Storage,
    ValueStorage,
};

/// Owner handed to every listener. Pools are shared through `Rc` so a
/// listener can fetch the pool that is publishing and call back into it.
#[derive(Default)]
pub struct Registry {
    pools: HashMap<TypeId, Rc<dyn Any>>,
    next_index: u32,
    pub log: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self) -> EntityId {
        let entity = EntityId::new(self.next_index, 0);
        self.next_index += 1;
        entity
    }

    pub fn create_many(&mut self, count: usize) -> Vec<EntityId> {
        (0..count).map(|_| self.create()).collect()
    }

    pub fn pool<C: Component>(&mut self) -> Rc<PoolOf<EntityId, C, Registry>> {
        let pool = self
            .pools
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Rc::new(PoolOf::<EntityId, C, Registry>::default()) as Rc<dyn Any>);
        Rc::clone(pool)
            .downcast::<PoolOf<EntityId, C, Registry>>()
            .expect("pool registered under the wrong type")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
declare_component!(Position);

#[derive(Clone, Debug, PartialEq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}
declare_component!(Velocity);

#[derive(Clone, Debug, PartialEq)]
pub struct Marker;
declare_component!(Marker, tag);

#[derive(Clone, Debug, PartialEq)]
pub struct Counted(pub u32);
declare_component!(Counted, pool = CountingPool);

pub type CountingPool<E, R> = Pool<E, CountingStorage<E>, R>;

/// `SparseSet` wrapper recording how the pool drives its storage.
pub struct CountingStorage<E> {
    inner: SparseSet<E, Counted>,
    pub emplaces: usize,
    pub inserts: usize,
    pub erases: usize,
    pub clears: usize,
    pub patches: usize,
}

impl<E: Entity> Default for CountingStorage<E> {
    fn default() -> Self {
        Self::with_config(&PoolConfig::default())
    }
}

impl<E: Entity> Storage<E> for CountingStorage<E> {
    type Value = Counted;
    type Handle<'a> = Option<RefMut<'a, Counted>> where Self: 'a;

    fn with_config(config: &PoolConfig) -> Self {
        Self {
            inner: SparseSet::with_config(config),
            emplaces: 0,
            inserts: 0,
            erases: 0,
            clears: 0,
            patches: 0,
        }
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, entity: E) -> bool {
        self.inner.contains(entity)
    }

    fn entities(&self) -> &[E] {
        self.inner.entities()
    }

    fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }

    fn emplace(&mut self, entity: E, value: Counted) {
        self.emplaces += 1;
        self.inner.emplace(entity, value);
    }

    fn insert<I>(&mut self, entities: &[E], values: I)
    where
        I: IntoIterator<Item = Counted>,
    {
        self.inserts += 1;
        self.inner.insert(entities, values);
    }

    fn erase(&mut self, entity: E) {
        self.erases += 1;
        self.inner.erase(entity);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.inner.clear();
    }

    fn patch<M: Mutators<Counted>>(&mut self, entity: E, mutators: M) {
        self.patches += 1;
        self.inner.patch(entity, mutators);
    }

    fn handle(cell: &RefCell<Self>, entity: E) -> Option<RefMut<'_, Counted>> {
        RefMut::filter_map(cell.borrow_mut(), |storage| storage.inner.get_mut(entity)).ok()
    }
}
