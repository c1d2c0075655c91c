//! Visitation of the active alternative of one or more containers.
//!
//! A visitor is any type implementing [`Visitor<Args>`] for the arguments it
//! can receive. What the argument looks like depends on the mode:
//!
//! - **deduced** ([`visit`], [`visit_all`]): the visitor receives the value of
//!   the active alternative in the [access category](access) of the
//!   container, and must return the same [`Visitor::Output`] for every
//!   alternative. Valueless containers are rejected before dispatch.
//! - **raw** ([`raw_visit`]): like deduced, but the visitor also receives
//!   [`Valueless`] for a valueless container, and its return value is
//!   discarded.
//! - **raw-indexed** ([`raw_visit_indexed`], [`raw_visit_all`]): like raw, but
//!   each value is wrapped in [`Indexed<I, _>`](Indexed) to carry its
//!   compile-time index.
//!
//! Closures implement [`Visitor`] for the single argument type they accept,
//! which is enough for lists whose alternatives all share the same argument
//! type.
//!
//! See [`dispatch`] for how the active alternative is selected, and [`multi`]
//! for how several containers are visited at once.

pub mod access;
pub mod dispatch;
pub mod multi;

use core::ptr::NonNull;

pub use self::{
    access::{Access, Exclusive, Owned, Shared},
    dispatch::{Dispatch, RawDispatch},
    multi::{
        Curry, Deduced, Mode, PlaceList, Push, RawIndexed, VisitAllOutput, raw_visit_all,
        visit_all,
    },
};
use crate::list::AlternativeList;

/// A callable that accepts `Args`.
///
/// Visitors are consumed by the call. Implement it for every argument type
/// the visitor should handle; the dispatch traits check at compile time that
/// every alternative is covered.
pub trait Visitor<Args> {
    /// The value returned by the visitor.
    type Output;

    /// Calls the visitor.
    fn visit(self, args: Args) -> Self::Output;
}

impl<F, Args, R> Visitor<Args> for F
where
    F: FnOnce(Args) -> R,
{
    type Output = R;

    #[inline]
    fn visit(self, args: Args) -> R {
        self(args)
    }
}

/// A raw-indexed visitor argument: the value of alternative `I`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Indexed<const I: usize, A>(pub A);

impl<const I: usize, A> Indexed<I, A> {
    /// The index of the alternative this argument came from.
    pub const INDEX: usize = I;

    /// Returns the wrapped argument.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }
}

/// A raw visitor argument standing for a valueless container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Valueless;

/// Adapter turning a raw visitor into a raw-indexed one by dropping the
/// index.
#[derive(Clone, Copy, Debug)]
pub struct Unindexed<V>(pub V);

impl<const I: usize, A, V> Visitor<Indexed<I, A>> for Unindexed<V>
where
    V: Visitor<A>,
{
    type Output = ();

    #[inline]
    fn visit(self, args: Indexed<I, A>) {
        let _ = self.0.visit(args.0);
    }
}

impl<V> Visitor<Valueless> for Unindexed<V>
where
    V: Visitor<Valueless>,
{
    type Output = ();

    #[inline]
    fn visit(self, args: Valueless) {
        let _ = self.0.visit(args);
    }
}

/// Something that can be visited: a shared, exclusive or owned container.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// 1. [`Place::enter`] passes a pointer to the storage block of the container
///    and its current discriminant, where the discriminant is consistent
///    with the live cell or equal to `VARIANT_NPOS`.
/// 2. The pointer is valid for the access performed by `Category`, for as
///    long as the arguments that category produces are used.
/// 3. If `Category` moves values out, the container does not touch its
///    storage again after `enter`.
/// 4. [`Place::is_valid`] returns `false` only if the discriminant is
///    `VARIANT_NPOS`.
pub unsafe trait Place: Sized {
    /// The alternative list of the container.
    type List: AlternativeList;

    /// The access category of this place.
    type Category;

    /// The discriminant of the container.
    fn index(&self) -> usize;

    /// Whether the container holds an alternative.
    fn is_valid(&self) -> bool;

    /// Calls `f` with the storage block and discriminant of the container.
    fn enter<R>(
        self,
        f: impl FnOnce(NonNull<<Self::List as AlternativeList>::Storage>, usize) -> R,
    ) -> R;
}

/// The output of deduced visitation of the place `P` with the visitor `V`.
pub type VisitOutput<P, V> =
    <<P as Place>::List as Dispatch<<P as Place>::Category, V>>::Output;

/// Visits the active alternative of `place` in deduced-return mode.
///
/// Returns `None` without calling the visitor if the container is valueless.
#[inline]
pub fn visit<P, V>(place: P, visitor: V) -> Option<VisitOutput<P, V>>
where
    P: Place,
    P::List: Dispatch<P::Category, V>,
{
    if !place.is_valid() {
        return None;
    }
    Some(place.enter(|storage, index| {
        // SAFETY:
        // 1. The place is valid, so `index < LEN` names the live cell
        // 2. Guaranteed by `Place::enter`
        // 3. Guaranteed by `Place::enter`
        unsafe { <P::List as Dispatch<P::Category, V>>::dispatch(storage, index, visitor) }
    }))
}

/// Visits the active alternative of `place` in raw-indexed mode.
///
/// The visitor receives [`Indexed<I, _>`](Indexed) for alternative `I`, or
/// [`Valueless`].
#[inline]
pub fn raw_visit_indexed<P, V>(place: P, visitor: V)
where
    P: Place,
    P::List: RawDispatch<P::Category, V>,
{
    place.enter(|storage, index| {
        // SAFETY:
        // 1. Guaranteed by `Place::enter`, and `VARIANT_NPOS` is only
        //    possible for lists that are not `NEVER_VALUELESS`
        // 2. Guaranteed by `Place::enter`
        // 3. Guaranteed by `Place::enter`
        unsafe { <P::List as RawDispatch<P::Category, V>>::raw_dispatch(storage, index, visitor) }
    });
}

/// Visits the active alternative of `place` in raw mode.
///
/// The visitor receives the value of the active alternative, or
/// [`Valueless`].
#[inline]
pub fn raw_visit<P, V>(place: P, visitor: V)
where
    P: Place,
    P::List: RawDispatch<P::Category, Unindexed<V>>,
{
    raw_visit_indexed(place, Unindexed(visitor));
}
