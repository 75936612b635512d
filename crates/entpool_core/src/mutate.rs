//! # Mutators
//!
//! Tuples of `FnOnce(&mut T)` closures applied in order by `patch`.
//!
//! ```rust
//! use entpool_core::Mutators;
//!
//! let mut value = 1;
//! (|v: &mut i32| *v += 1, |v: &mut i32| *v *= 10).apply(&mut value);
//! assert_eq!(value, 20);
//! ```

/// An ordered set of in-place edits for a `T`.
///
/// Implemented for `()` (no edit) and for tuples of up to eight closures.
pub trait Mutators<T> {
    /// Applies every edit to `value`, first element first.
    fn apply(self, value: &mut T);
}

impl<T> Mutators<T> for () {
    #[inline]
    fn apply(self, _value: &mut T) {}
}

macro_rules! mutator_tuple {
    ($head:ident) => {
        impl_mutator_tuple!($head);
    };
    ($head:ident, $( $tail:ident ),*) => {
        impl_mutator_tuple!($head, $( $tail ),*);
        mutator_tuple!($( $tail ),*);
    };
}

macro_rules! impl_mutator_tuple {
    ( $( $f:ident ),* ) => {
        impl<T, $( $f ),*> Mutators<T> for ($( $f, )*)
        where
            $( $f: FnOnce(&mut T) ),*
        {
            #[inline]
            #[allow(non_snake_case)]
            fn apply(self, value: &mut T) {
                let ($( $f, )*) = self;
                $( $f(value); )*
            }
        }
    };
}

mutator_tuple!(F0, F1, F2, F3, F4, F5, F6, F7);
