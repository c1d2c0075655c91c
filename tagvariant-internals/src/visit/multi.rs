//! Visitation of several containers at once.
//!
//! Visiting the containers `c0, c1, ..., cn` with a visitor `V` calls `V`
//! with the tuple `(a0, a1, ..., an)` of their active alternatives. The
//! containers are dispatched one dimension at a time: the table of `c0`
//! selects an entry that receives `a0`, pushes it onto the argument prefix
//! and dispatches `c1` with the extended prefix, and so on. The visitor that
//! travels through the dimensions is a [`Curry`]; after the last container it
//! hands the full tuple to `V`.
//!
//! Each dimension costs one table lookup, and the tables are the ordinary
//! per-list tables of [`dispatch`](super::dispatch). The places are passed
//! as a cons list `(p0, (p1, (p2, ())))`, see [`PlaceList`].
//!
//! The [`Mode`] decides how each dimension is dispatched:
//!
//! - [`Deduced`]: every combination must produce the same output, and all
//!   containers are checked for validity before the first dispatch
//! - [`RawIndexed`]: arguments arrive as [`Indexed<I, _>`](super::Indexed) or
//!   [`Valueless`](super::Valueless), and outputs are discarded

use core::marker::PhantomData;

use super::{Dispatch, Place, RawDispatch, Visitor};

/// A cons list of places: `()` or `(P, Tail)`.
pub trait PlaceList {
    /// Whether every place in the list holds an alternative.
    fn all_valid(&self) -> bool;
}

impl PlaceList for () {
    #[inline]
    fn all_valid(&self) -> bool {
        true
    }
}

impl<P, Tail> PlaceList for (P, Tail)
where
    P: Place,
    Tail: PlaceList,
{
    #[inline]
    fn all_valid(&self) -> bool {
        self.0.is_valid() && self.1.all_valid()
    }
}

/// Appends `X` to a tuple.
pub trait Push<X> {
    /// The tuple with `X` appended.
    type Pushed;

    /// Appends `x`.
    fn push(self, x: X) -> Self::Pushed;
}

/// Implements [`Push`] for tuples of the given length.
macro_rules! impl_push {
    ($($T:ident $t:ident),*) => {
        impl<$($T,)* X> Push<X> for ($($T,)*) {
            type Pushed = ($($T,)* X,);

            #[inline]
            fn push(self, x: X) -> Self::Pushed {
                let ($($t,)*) = self;
                ($($t,)* x,)
            }
        }
    };
}

impl_push!();
impl_push!(T0 t0);
impl_push!(T0 t0, T1 t1);
impl_push!(T0 t0, T1 t1, T2 t2);
impl_push!(T0 t0, T1 t1, T2 t2, T3 t3);
impl_push!(T0 t0, T1 t1, T2 t2, T3 t3, T4 t4);
impl_push!(T0 t0, T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);
impl_push!(T0 t0, T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6);

/// How one dimension of a multi-container visit is dispatched.
///
/// # Safety
///
/// Implementors must dispatch `visitor` to the active alternative of `place`
/// through the dispatch table of its list.
pub unsafe trait Mode<P: Place, W> {
    /// What the dimension returns.
    type Output;

    /// Dispatches `visitor` on `place`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. If the mode requires it, `place` is valid.
    unsafe fn step(place: P, visitor: W) -> Self::Output;
}

/// Deduced-return mode. Requires every place to be valid.
#[derive(Clone, Copy, Debug)]
pub struct Deduced;

/// Raw-indexed mode. Valueless places are visited as
/// [`Valueless`](super::Valueless).
#[derive(Clone, Copy, Debug)]
pub struct RawIndexed;

// SAFETY: Dispatches through `Dispatch::dispatch_table`.
unsafe impl<P, W> Mode<P, W> for Deduced
where
    P: Place,
    P::List: Dispatch<P::Category, W>,
{
    type Output = <P::List as Dispatch<P::Category, W>>::Output;

    #[inline]
    unsafe fn step(place: P, visitor: W) -> Self::Output {
        place.enter(|storage, index| {
            // SAFETY:
            // 1. The place is valid, guaranteed by the caller, so
            //    `index < LEN` names the live cell
            // 2. Guaranteed by `Place::enter`
            // 3. Guaranteed by `Place::enter`
            unsafe {
                <P::List as Dispatch<P::Category, W>>::dispatch_table(storage, index, visitor)
            }
        })
    }
}

// SAFETY: Dispatches through `RawDispatch::raw_dispatch_table`.
unsafe impl<P, W> Mode<P, W> for RawIndexed
where
    P: Place,
    P::List: RawDispatch<P::Category, W>,
{
    type Output = ();

    #[inline]
    unsafe fn step(place: P, visitor: W) {
        place.enter(|storage, index| {
            // SAFETY:
            // 1. Guaranteed by `Place::enter`, and `VARIANT_NPOS` is only
            //    possible for lists that are not `NEVER_VALUELESS`
            // 2. Guaranteed by `Place::enter`
            // 3. Guaranteed by `Place::enter`
            unsafe {
                <P::List as RawDispatch<P::Category, W>>::raw_dispatch_table(
                    storage, index, visitor,
                );
            }
        });
    }
}

/// Visitor carrying the user visitor `V`, the arguments collected so far and
/// the places still to dispatch.
///
/// Only created by [`visit_all`] and [`raw_visit_all`], after the places have
/// been checked as the mode `M` requires.
pub struct Curry<M, V, Prefix, Rest> {
    /// The visitor receiving the full argument tuple
    visitor: V,
    /// Arguments of the dimensions dispatched so far
    prefix: Prefix,
    /// Places of the remaining dimensions
    rest: Rest,
    /// The dispatch mode of the remaining dimensions
    _mode: PhantomData<M>,
}

impl<M, V, Prefix, Rest> Curry<M, V, Prefix, Rest> {
    /// Creates a curry for the remaining places `rest`.
    #[inline]
    fn new(visitor: V, prefix: Prefix, rest: Rest) -> Self {
        Self {
            visitor,
            prefix,
            rest,
            _mode: PhantomData,
        }
    }
}

impl<M, V, Prefix, X> Visitor<X> for Curry<M, V, Prefix, ()>
where
    Prefix: Push<X>,
    V: Visitor<Prefix::Pushed>,
{
    type Output = V::Output;

    #[inline]
    fn visit(self, x: X) -> V::Output {
        self.visitor.visit(self.prefix.push(x))
    }
}

impl<M, V, Prefix, P, Tail, X> Visitor<X> for Curry<M, V, Prefix, (P, Tail)>
where
    Prefix: Push<X>,
    P: Place,
    M: Mode<P, Curry<M, V, Prefix::Pushed, Tail>>,
{
    type Output = M::Output;

    #[inline]
    fn visit(self, x: X) -> M::Output {
        let (place, tail) = self.rest;
        let next = Curry::new(self.visitor, self.prefix.push(x), tail);
        // SAFETY:
        // 1. A `Curry` only exists after `visit_all` checked every place for
        //    validity, or for `RawIndexed`, which does not require it
        unsafe { M::step(place, next) }
    }
}

/// The output of [`visit_all`] over the places `(P, Tail)` with the visitor
/// `V`.
pub type VisitAllOutput<P, Tail, V> = <Deduced as Mode<P, Curry<Deduced, V, (), Tail>>>::Output;

/// Visits every place of the cons list `(head, tail)` in deduced-return
/// mode.
///
/// Returns `None` without calling the visitor if any container is
/// valueless.
#[inline]
pub fn visit_all<P, Tail, V>(places: (P, Tail), visitor: V) -> Option<VisitAllOutput<P, Tail, V>>
where
    P: Place,
    Tail: PlaceList,
    Deduced: Mode<P, Curry<Deduced, V, (), Tail>>,
{
    if !places.all_valid() {
        return None;
    }
    let (head, tail) = places;
    // SAFETY:
    // 1. Every place was checked for validity above
    Some(unsafe {
        <Deduced as Mode<P, Curry<Deduced, V, (), Tail>>>::step(head, Curry::new(visitor, (), tail))
    })
}

/// Visits every place of the cons list `(head, tail)` in raw-indexed mode.
#[inline]
pub fn raw_visit_all<P, Tail, V>(places: (P, Tail), visitor: V)
where
    P: Place,
    Tail: PlaceList,
    RawIndexed: Mode<P, Curry<RawIndexed, V, (), Tail>>,
{
    let (head, tail) = places;
    // SAFETY:
    // 1. `RawIndexed` does not require valid places
    unsafe {
        <RawIndexed as Mode<P, Curry<RawIndexed, V, (), Tail>>>::step(
            head,
            Curry::new(visitor, (), tail),
        );
    }
}
