//! # Signal
//!
//! An ordered list of listeners sharing one call signature:
//! `Fn(&mut Owner, Args)`.
//!
//! ## Dispatch Rules
//!
//! - Listeners run in the order they were connected (FIFO).
//! - The listener list is snapshotted when a publish starts. Connecting or
//!   disconnecting from inside a listener is allowed and takes effect on the
//!   next publish.
//! - No borrow of the list is held while a listener runs, so listeners may
//!   re-enter the signal (publish again, connect, disconnect).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::sink::Sink;

/// Shared, reference-counted listener callback.
///
/// Listeners are `Fn` rather than `FnMut` so that a listener can be invoked
/// again while one of its own calls is still on the stack. State that must
/// change goes behind a `Cell`/`RefCell` captured by the closure.
pub type Listener<O, A> = Rc<dyn Fn(&mut O, A)>;

/// Opaque token identifying one connected listener.
///
/// Returned by [`Signal::connect`] and consumed by [`Signal::disconnect`].
/// Tokens are never reused within one signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "a dropped connection token can no longer disconnect its listener"]
pub struct Connection(u64);

impl Connection {
    /// Raw id of the token, unique per signal.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

struct Slot<O: ?Sized, A> {
    connection: Connection,
    listener: Listener<O, A>,
}

/// Ordered listener list.
///
/// # Type Parameters
///
/// * `O` - Owner type handed to every listener by mutable reference
/// * `A` - Argument payload, cloned once per listener call
///
/// # Thread Safety
///
/// Not thread-safe. The signal uses `Rc`/`RefCell` and is meant to live on
/// one thread together with the data it describes.
pub struct Signal<O: ?Sized, A> {
    slots: RefCell<Vec<Slot<O, A>>>,
    next_id: Cell<u64>,
}

impl<O: ?Sized, A> Signal<O, A> {
    /// Creates a signal with no listeners.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Returns the number of connected listeners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns `true` if no listener is connected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Returns a sink bound to this signal.
    #[inline]
    #[must_use]
    pub fn sink(&self) -> Sink<'_, O, A> {
        Sink::new(self)
    }

    /// Connects a listener at the end of the list.
    ///
    /// # Returns
    ///
    /// A token that disconnects exactly this listener.
    pub fn connect<F>(&self, listener: F) -> Connection
    where
        F: Fn(&mut O, A) + 'static,
    {
        self.connect_shared(Rc::new(listener))
    }

    /// Connects an already shared listener.
    ///
    /// The same `Rc` may be connected several times; every connection gets its
    /// own token and its own call per publish.
    pub fn connect_shared(&self, listener: Listener<O, A>) -> Connection {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let connection = Connection(id);
        let mut slots = self.slots.borrow_mut();
        slots.push(Slot { connection, listener });

        tracing::debug!(connection = id, listeners = slots.len(), "listener connected");
        connection
    }

    /// Disconnects the listener behind `connection`.
    ///
    /// The relative order of the remaining listeners is kept.
    ///
    /// # Returns
    ///
    /// `true` if a listener was removed, `false` if the token was stale.
    pub fn disconnect(&self, connection: Connection) -> bool {
        let mut slots = self.slots.borrow_mut();
        let Some(position) = slots.iter().position(|slot| slot.connection == connection) else {
            return false;
        };

        // Dropped outside the borrow: a listener's captures may own anything.
        let slot = slots.remove(position);
        let remaining = slots.len();
        drop(slots);
        drop(slot);

        tracing::debug!(connection = connection.id(), listeners = remaining, "listener disconnected");
        true
    }

    /// Disconnects every listener.
    pub fn disconnect_all(&self) {
        let slots = std::mem::take(&mut *self.slots.borrow_mut());
        tracing::debug!(dropped = slots.len(), "all listeners disconnected");
    }

    fn snapshot(&self) -> Vec<Listener<O, A>> {
        self.slots
            .borrow()
            .iter()
            .map(|slot| Rc::clone(&slot.listener))
            .collect()
    }
}

impl<O: ?Sized, A: Clone> Signal<O, A> {
    /// Invokes every listener with `(owner, args)` in subscription order.
    ///
    /// Does nothing (and allocates nothing) when the signal is empty.
    pub fn publish(&self, owner: &mut O, args: A) {
        if self.is_empty() {
            return;
        }

        for listener in self.snapshot() {
            listener(owner, args.clone());
        }
    }

    /// Publishes once per item of `args`, in iteration order.
    ///
    /// The listener list is snapshotted once for the whole batch, so the
    /// listener set is the same for every item. For each item all listeners
    /// run before the next item is published.
    pub fn publish_each<I>(&self, owner: &mut O, args: I)
    where
        I: IntoIterator<Item = A>,
    {
        if self.is_empty() {
            return;
        }

        let listeners = self.snapshot();
        for item in args {
            for listener in &listeners {
                listener(owner, item.clone());
            }
        }
    }
}

impl<O: ?Sized, A> Default for Signal<O, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ?Sized, A> fmt::Debug for Signal<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
