//! # ENTPOOL Core
//!
//! Component pools for an Entity Component System, with lifecycle signals.
//!
//! - Sparse-set storage: O(1) insert, lookup and removal per entity
//! - Zero-size components stored as presence only
//! - Construction, update and destruction listeners that may reenter the pool
//!
//! ## Layers
//!
//! ```text
//! Component ──declare_component!──> PoolOf<E, C, R>
//!                                        │
//!                                   Pool<E, S, R>  ── Signal × 3 (entpool_signal)
//!                                        │
//!                           Storage<E>: SparseSet | TagSet
//! ```
//!
//! ## Example
//!
//! ```rust
//! use entpool_core::{declare_component, PoolOf};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Health(i32);
//! declare_component!(Health);
//!
//! #[derive(Default)]
//! struct Log(Vec<u32>);
//!
//! let pool: PoolOf<u32, Health, Log> = Default::default();
//! let _conn = pool.on_destroy().connect(|log: &mut Log, entity| log.0.push(entity));
//!
//! let mut log = Log::default();
//! pool.insert(&mut log, &[1, 2, 3], Health(100));
//! pool.patch_with(&mut log, 2, |health| health.0 -= 30);
//! pool.erase(&mut log, 1);
//!
//! assert_eq!(*pool.get(2).unwrap(), Health(70));
//! assert_eq!(log.0, vec![1]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod access;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod mutate;
pub mod pool;
pub mod storage;

pub use access::{Access, PoolView, Read, ViewOf, Write};
pub use component::{Component, ComponentPool, PoolOf};
pub use config::{PoolConfig, DEFAULT_PAGE_SIZE};
pub use entity::{Entity, EntityId};
pub use error::{PoolError, PoolResult};
pub use mutate::Mutators;
pub use pool::Pool;
pub use storage::{SparseSet, Storage, TagSet, ValueStorage};

pub use entpool_signal::{Connection, Sink, Signal};
