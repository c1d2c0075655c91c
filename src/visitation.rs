//! Visitation of several containers at once.
//!
//! [`visit()`] calls a visitor with the active alternatives of up to eight
//! containers, passed as a tuple of handles. Each handle is a `&Variant`, a
//! `&mut Variant` or an owned `Variant`, and decides whether its argument is
//! a shared reference, a mutable reference or the value itself. Different
//! containers may have different alternative lists.
//!
//! # Examples
//!
//! ```
//! use tagvariant::{Variant, Visitor, visit};
//!
//! struct Sum;
//!
//! impl<A: Copy + Into<f64>, B: Copy + Into<f64>> Visitor<(&A, &B)> for Sum {
//!     type Output = f64;
//!
//!     fn visit(self, (a, b): (&A, &B)) -> f64 {
//!         (*a).into() + (*b).into()
//!     }
//! }
//!
//! let a: Variant<(u8, f32)> = Variant::new::<0>(2);
//! let b: Variant<(f64, u16)> = Variant::new::<1>(3);
//! assert_eq!(visit((&a, &b), Sum), Ok(5.0));
//! ```

use tagvariant_internals::{
    AlternativeList, Place, PlaceList, RawVariant,
    visit::{Curry, Deduced, Mode, RawIndexed, VisitAllOutput},
};

use crate::{error::BadAccess, variant::Variant};

/// A container handle that can take part in a visit.
///
/// Implemented for `&Variant<L>`, `&mut Variant<L>` and `Variant<L>`.
pub trait Handle {
    /// The raw place the handle visits.
    #[doc(hidden)]
    type Place: Place;

    /// Converts the handle into its raw place.
    #[doc(hidden)]
    fn into_place(self) -> Self::Place;
}

impl<'a, L: AlternativeList> Handle for &'a Variant<L> {
    type Place = &'a RawVariant<L>;

    #[inline]
    fn into_place(self) -> Self::Place {
        self.as_raw()
    }
}

impl<'a, L: AlternativeList> Handle for &'a mut Variant<L> {
    type Place = &'a mut RawVariant<L>;

    #[inline]
    fn into_place(self) -> Self::Place {
        self.as_raw_mut()
    }
}

impl<L: AlternativeList> Handle for Variant<L> {
    type Place = RawVariant<L>;

    #[inline]
    fn into_place(self) -> Self::Place {
        self.into_raw()
    }
}

/// A tuple of 1 to 8 container [`Handle`]s.
pub trait Handles {
    /// The place of the first handle.
    #[doc(hidden)]
    type Head: Place;

    /// The places of the remaining handles, as a cons list.
    #[doc(hidden)]
    type Tail: PlaceList;

    /// Converts the handles into a cons list of places.
    #[doc(hidden)]
    fn into_places(self) -> (Self::Head, Self::Tail);
}

/// The cons list type of the places of the given handles.
macro_rules! cons {
    () => { () };
    ($H:ident $(, $T:ident)*) => { (<$H as Handle>::Place, cons!($($T),*)) };
}

/// The cons list value of the places of the given handles.
macro_rules! cons_value {
    () => { () };
    ($h:ident $(, $t:ident)*) => { ($h.into_place(), cons_value!($($t),*)) };
}

/// Implements [`Handles`] for tuples of the given handles.
macro_rules! impl_handles {
    ($H:ident $h:ident $(, $T:ident $t:ident)*) => {
        impl<$H: Handle, $($T: Handle),*> Handles for ($H, $($T,)*) {
            type Head = <$H as Handle>::Place;
            type Tail = cons!($($T),*);

            #[inline]
            fn into_places(self) -> (Self::Head, Self::Tail) {
                let ($h, $($t,)*) = self;
                ($h.into_place(), cons_value!($($t),*))
            }
        }
    };
}

impl_handles!(H0 h0);
impl_handles!(H0 h0, H1 h1);
impl_handles!(H0 h0, H1 h1, H2 h2);
impl_handles!(H0 h0, H1 h1, H2 h2, H3 h3);
impl_handles!(H0 h0, H1 h1, H2 h2, H3 h3, H4 h4);
impl_handles!(H0 h0, H1 h1, H2 h2, H3 h3, H4 h4, H5 h5);
impl_handles!(H0 h0, H1 h1, H2 h2, H3 h3, H4 h4, H5 h5, H6 h6);
impl_handles!(H0 h0, H1 h1, H2 h2, H3 h3, H4 h4, H5 h5, H6 h6, H7 h7);

/// The output of [`visit()`] for the handles `H` and the visitor `V`.
pub type VisitOutput<H, V> = VisitAllOutput<<H as Handles>::Head, <H as Handles>::Tail, V>;

/// Calls `visitor` with the tuple of the active alternatives of `handles`.
///
/// The visitor must accept every combination of alternatives and return the
/// same type for all of them. Each container costs one table lookup.
///
/// # Errors
///
/// Returns [`BadAccess::Valueless`] without calling the visitor if any
/// container is valueless.
#[inline]
pub fn visit<H, V>(handles: H, visitor: V) -> Result<VisitOutput<H, V>, BadAccess>
where
    H: Handles,
    Deduced: Mode<H::Head, Curry<Deduced, V, (), H::Tail>>,
{
    tagvariant_internals::visit_all(handles.into_places(), visitor).ok_or(BadAccess::Valueless)
}

/// Calls `visitor` with the tuple of the active alternatives of `handles`,
/// each wrapped in [`Indexed<I, _>`](crate::Indexed), or
/// [`Valueless`](crate::Valueless) for a valueless container.
///
/// The output of the visitor is discarded.
#[inline]
pub fn visit_raw_indexed<H, V>(handles: H, visitor: V)
where
    H: Handles,
    RawIndexed: Mode<H::Head, Curry<RawIndexed, V, (), H::Tail>>,
{
    tagvariant_internals::raw_visit_all(handles.into_places(), visitor);
}
