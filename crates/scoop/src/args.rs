//! Values handed to the debugger and the passthrough contract.

use std::any::type_name;
use std::fmt::{self, Debug};

/// One value passed to the debugger, borrowed for the duration of a call.
#[derive(Clone, Copy)]
pub struct Arg<'a> {
    /// The value.
    pub value: &'a dyn Debug,
    /// `std::any::type_name` of the value.
    pub type_name: &'static str,
}

impl<'a> Arg<'a> {
    /// Borrows `value` as an argument.
    pub fn new<T: Debug>(value: &'a T) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }
}

impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A group of values passed in one debugger call.
///
/// Implemented for `()` and for tuples of up to twelve `Debug` values. The
/// [`Output`](Args::Output) is what the call evaluates to: `()` for no
/// values, the value itself for one, and the whole tuple otherwise.
pub trait Args {
    /// The passthrough value.
    type Output;

    /// Borrows every value, left to right.
    fn args(&self) -> Vec<Arg<'_>>;

    /// Number of values.
    fn len(&self) -> usize;

    /// Returns `true` for the empty group.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the group into the passthrough value.
    fn into_output(self) -> Self::Output;
}

impl Args for () {
    type Output = ();

    fn args(&self) -> Vec<Arg<'_>> {
        Vec::new()
    }

    fn len(&self) -> usize {
        0
    }

    fn into_output(self) {}
}

impl<A: Debug> Args for (A,) {
    type Output = A;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![Arg::new(&self.0)]
    }

    fn len(&self) -> usize {
        1
    }

    fn into_output(self) -> A {
        self.0
    }
}

macro_rules! impl_args_for_tuple {
    ($len:literal => $($name:ident . $idx:tt),+) => {
        impl<$($name: Debug),+> Args for ($($name,)+) {
            type Output = Self;

            fn args(&self) -> Vec<Arg<'_>> {
                vec![$(Arg::new(&self.$idx)),+]
            }

            fn len(&self) -> usize {
                $len
            }

            fn into_output(self) -> Self {
                self
            }
        }
    };
}

impl_args_for_tuple!(2 => A.0, B.1);
impl_args_for_tuple!(3 => A.0, B.1, C.2);
impl_args_for_tuple!(4 => A.0, B.1, C.2, D.3);
impl_args_for_tuple!(5 => A.0, B.1, C.2, D.3, E.4);
impl_args_for_tuple!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
impl_args_for_tuple!(7 => A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_args_for_tuple!(8 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
impl_args_for_tuple!(9 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
impl_args_for_tuple!(10 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
impl_args_for_tuple!(11 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
impl_args_for_tuple!(12 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);
