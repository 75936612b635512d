//! # Component Registration
//!
//! Maps a component type to the pool that stores it.
//!
//! ```text
//! Position  ──declare_component!──> Pool<E, SparseSet<E, Position>, R>
//! Frozen    ──declare_component!(Frozen, tag)──> Pool<E, TagSet<E, Frozen>, R>
//! Custom    ──declare_component!(Custom, pool = MyPool)──> MyPool<E, R>
//! ```
//!
//! The default choice happens in one place, so a registry can resolve
//! `PoolOf<E, C, R>` for any `C` without knowing how `C` is stored.

use std::cell::Ref;

use entpool_signal::Sink;

use crate::entity::Entity;
use crate::mutate::Mutators;

/// Pool operations shared by every pool type.
///
/// [`crate::Pool`] implements it for any storage; custom pools registered with
/// `declare_component!(T, pool = ...)` implement it themselves.
pub trait ComponentPool<E: Entity, R: ?Sized>: Default {
    /// Component type stored by the pool.
    type Value;

    /// What `emplace` and `patch` return.
    type Handle<'a>
    where
        Self: 'a;

    /// Number of entities in the pool.
    fn len(&self) -> usize;

    /// `true` if the pool holds no entity.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `entity` has a component in this pool.
    fn contains(&self, entity: E) -> bool;

    /// Entities in iteration order.
    fn entities(&self) -> Ref<'_, [E]>;

    /// Assigns `value` to `entity` and publishes construction.
    fn emplace(&self, owner: &mut R, entity: E, value: Self::Value) -> Self::Handle<'_>;

    /// Assigns a copy of `value` to every entity, then publishes construction
    /// per entity if anyone listens.
    fn insert(&self, owner: &mut R, entities: &[E], value: Self::Value)
    where
        Self::Value: Clone;

    /// Publishes destruction, then removes `entity`.
    fn erase(&self, owner: &mut R, entity: E);

    /// Removes every entity in `entities`.
    fn erase_many(&self, owner: &mut R, entities: &[E]);

    /// Applies `mutators` to the component of `entity` and publishes update.
    fn patch<M: Mutators<Self::Value>>(&self, owner: &mut R, entity: E, mutators: M) -> Self::Handle<'_>;

    /// Construction sink.
    fn on_construct(&self) -> Sink<'_, R, E>;

    /// Update sink.
    fn on_update(&self) -> Sink<'_, R, E>;

    /// Destruction sink.
    fn on_destroy(&self) -> Sink<'_, R, E>;
}

/// A type that can be attached to entities.
///
/// Implement it through [`declare_component!`](crate::declare_component).
pub trait Component: Sized + 'static {
    /// Pool storing this component for entity type `E` and owner `R`.
    type Pool<E: Entity, R: ?Sized>: ComponentPool<E, R, Value = Self>;
}

/// Pool type for component `C`.
pub type PoolOf<E, C, R> = <C as Component>::Pool<E, R>;

/// Registers a component type and picks its pool.
///
/// ```rust
/// use entpool_core::{declare_component, PoolOf};
///
/// #[derive(Clone)]
/// struct Velocity(f32, f32);
/// declare_component!(Velocity);
///
/// struct Sleeping;
/// declare_component!(Sleeping, tag);
///
/// let velocities: PoolOf<u32, Velocity, ()> = Default::default();
/// let sleepers: PoolOf<u32, Sleeping, ()> = Default::default();
///
/// if let Some(mut velocity) = velocities.emplace(&mut (), 1, Velocity(0.0, 1.0)) {
///     velocity.0 += 2.0;
/// }
/// sleepers.emplace(&mut (), 1, Sleeping);
///
/// assert_eq!(velocities.get(1).map(|v| v.0), Some(2.0));
/// assert!(sleepers.contains(1));
/// ```
///
/// Zero-size components must be declared as tags:
///
/// ```compile_fail
/// use entpool_core::declare_component;
///
/// struct Sleeping;
/// declare_component!(Sleeping);
/// ```
#[macro_export]
macro_rules! declare_component {
    ($component:ty) => {
        const _: () = assert!(
            ::std::mem::size_of::<$component>() != 0,
            "zero-size components are tags: use declare_component!(T, tag)"
        );

        impl $crate::Component for $component {
            type Pool<E: $crate::Entity, R: ?Sized> = $crate::Pool<E, $crate::SparseSet<E, $component>, R>;
        }
    };
    ($component:ty, tag) => {
        impl $crate::Component for $component {
            type Pool<E: $crate::Entity, R: ?Sized> = $crate::Pool<E, $crate::TagSet<E, $component>, R>;
        }
    };
    ($component:ty, pool = $pool:ident) => {
        impl $crate::Component for $component {
            type Pool<E: $crate::Entity, R: ?Sized> = $pool<E, R>;
        }
    };
}
