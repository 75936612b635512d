//! Access markers deciding how a pool is handed out.
//!
//! `Read<C>` yields a [`PoolView`] that can only query; `Write<C>` yields the
//! pool itself. Systems written against [`ViewOf`] get the right one from the
//! marker alone.

use std::cell::Ref;
use std::fmt;
use std::marker::PhantomData;

use crate::component::{Component, ComponentPool, PoolOf};
use crate::entity::Entity;

/// Read-only access to component `C`.
pub struct Read<C>(PhantomData<fn() -> C>);

/// Read-write access to component `C`.
pub struct Write<C>(PhantomData<fn() -> C>);

/// Maps an access marker to the pool view it grants.
pub trait Access<'a, E: Entity, R: ?Sized + 'a> {
    /// Component being accessed.
    type Component: Component;

    /// What the caller receives.
    type View;

    /// Wraps `pool` according to the access mode.
    fn view(pool: &'a PoolOf<E, Self::Component, R>) -> Self::View;
}

impl<'a, E: Entity, R: ?Sized + 'a, C: Component> Access<'a, E, R> for Read<C> {
    type Component = C;
    type View = PoolView<'a, E, R, PoolOf<E, C, R>>;

    fn view(pool: &'a PoolOf<E, C, R>) -> Self::View {
        PoolView::new(pool)
    }
}

impl<'a, E: Entity, R: ?Sized + 'a, C: Component> Access<'a, E, R> for Write<C> {
    type Component = C;
    type View = &'a PoolOf<E, C, R>;

    fn view(pool: &'a PoolOf<E, C, R>) -> Self::View {
        pool
    }
}

/// View granted by access marker `A`.
pub type ViewOf<'a, E, A, R> = <A as Access<'a, E, R>>::View;

/// Query-only handle over a pool.
pub struct PoolView<'a, E, R: ?Sized, P> {
    pool: &'a P,
    _marker: PhantomData<(fn() -> E, fn(&mut R))>,
}

impl<'a, E, R, P> PoolView<'a, E, R, P>
where
    E: Entity,
    R: ?Sized,
    P: ComponentPool<E, R>,
{
    /// Wraps `pool`.
    #[must_use]
    pub fn new(pool: &'a P) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Number of entities in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// `true` if the pool holds no entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// `true` if `entity` has a component in the pool.
    #[must_use]
    pub fn contains(&self, entity: E) -> bool {
        self.pool.contains(entity)
    }

    /// Entities in iteration order.
    #[must_use]
    pub fn entities(&self) -> Ref<'a, [E]> {
        self.pool.entities()
    }
}

impl<E, R: ?Sized, P> Clone for PoolView<'_, E, R, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, R: ?Sized, P> Copy for PoolView<'_, E, R, P> {}

impl<E, R: ?Sized, P> fmt::Debug for PoolView<'_, E, R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolView").field("pool", &std::any::type_name::<P>()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare_component;

    #[derive(Clone, Debug)]
    struct Score(u32);
    declare_component!(Score);

    fn count<'a, A: Access<'a, u32, ()>>(pool: &'a PoolOf<u32, A::Component, ()>) -> A::View {
        A::view(pool)
    }

    #[test]
    fn test_read_view_queries() {
        let pool: PoolOf<u32, Score, ()> = Default::default();
        pool.insert(&mut (), &[1, 2], Score(0));

        let view: ViewOf<'_, u32, Read<Score>, ()> = count::<Read<Score>>(&pool);

        assert_eq!(view.len(), 2);
        assert!(view.contains(2));
        assert_eq!(&*view.entities(), &[1, 2]);
    }

    #[test]
    fn test_write_view_is_the_pool() {
        let pool: PoolOf<u32, Score, ()> = Default::default();

        let writer = count::<Write<Score>>(&pool);
        writer.emplace(&mut (), 3, Score(7)).unwrap().0 += 1;

        assert_eq!(pool.get(3).map(|s| s.0), Some(8));
    }
}
