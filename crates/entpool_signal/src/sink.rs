//! # Sink
//!
//! Borrowed handle over one [`Signal`], handed out by pools so callers can
//! attach and detach listeners without reaching the signal itself.

use std::fmt;

use crate::signal::{Connection, Listener, Signal};

/// Connect/disconnect handle bound to a signal.
///
/// A sink is `Copy` and can be kept for as long as the signal is borrowed.
/// Creating a sink registers nothing.
pub struct Sink<'a, O: ?Sized, A> {
    signal: &'a Signal<O, A>,
}

impl<'a, O: ?Sized, A> Sink<'a, O, A> {
    /// Creates a sink over `signal`.
    #[inline]
    #[must_use]
    pub const fn new(signal: &'a Signal<O, A>) -> Self {
        Self { signal }
    }

    /// Connects a listener after all existing ones.
    pub fn connect<F>(self, listener: F) -> Connection
    where
        F: Fn(&mut O, A) + 'static,
    {
        self.signal.connect(listener)
    }

    /// Connects an already shared listener.
    pub fn connect_shared(self, listener: Listener<O, A>) -> Connection {
        self.signal.connect_shared(listener)
    }

    /// Disconnects one listener. Returns `false` for a stale token.
    pub fn disconnect(self, connection: Connection) -> bool {
        self.signal.disconnect(connection)
    }

    /// Disconnects every listener of the underlying signal.
    pub fn disconnect_all(self) {
        self.signal.disconnect_all();
    }

    /// Number of listeners on the underlying signal.
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        self.signal.len()
    }

    /// `true` if the underlying signal has no listener.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.signal.is_empty()
    }
}

impl<O: ?Sized, A> Clone for Sink<'_, O, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized, A> Copy for Sink<'_, O, A> {}

impl<O: ?Sized, A> fmt::Debug for Sink<'_, O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("listeners", &self.len()).finish()
    }
}
