//! # ENTPOOL Signals
//!
//! Ordered listener lists used by component pools to announce lifecycle
//! events.
//!
//! ## Model
//!
//! ```text
//!  Signal<O, A>                    Sink<'_, O, A>
//!  ┌──────────────────────┐        ┌──────────────────┐
//!  │ [L0] [L1] [L2] ...   │<───────│ connect / drop   │
//!  └──────────┬───────────┘        └──────────────────┘
//!             │ publish(&mut owner, args)
//!             ▼
//!      L0(owner, args) → L1(owner, args) → L2(owner, args)
//! ```
//!
//! Listeners are invoked in subscription order. Every listener receives a
//! mutable reference to the owner passed into `publish`, which lets it call
//! back into whatever the owner holds, including the object publishing.
//!
//! ## Example
//!
//! ```rust
//! use entpool_signal::Signal;
//!
//! let signal: Signal<Vec<u32>, u32> = Signal::new();
//! let conn = signal.sink().connect(|log: &mut Vec<u32>, value| log.push(value));
//!
//! let mut log = Vec::new();
//! signal.publish(&mut log, 7);
//! assert_eq!(log, vec![7]);
//!
//! assert!(signal.sink().disconnect(conn));
//! assert!(signal.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod signal;
mod sink;

pub use signal::{Connection, Listener, Signal};
pub use sink::Sink;
