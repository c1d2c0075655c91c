//! Copy and move construction and assignment of containers.
//!
//! Each capability is a separate trait, implemented for an alternative list
//! exactly when every alternative supports the underlying operation:
//!
//! | capability     | trait                 | requirement on every alternative |
//! |----------------|-----------------------|----------------------------------|
//! | copy-construct | [`CopyConstructible`] | `Clone`                          |
//! | copy-assign    | [`CopyAssignable`]    | `Clone`                          |
//! | move-construct | [`MoveConstructible`] | none                             |
//! | move-assign    | [`MoveAssignable`]    | none                             |
//!
//! Moves of a container are bitwise and cannot fail, so move construction
//! needs no code. Move assignment is a bitwise overwrite when no alternative
//! has drop glue, and the shared assignment algorithm otherwise. Copies
//! always run the alternatives' `Clone` implementations.
//!
//! # Assignment
//!
//! Copy and move assignment share one algorithm, parameterized by the
//! [`AssignSource`]: an owned value is moved, a shared reference is cloned.
//! Visiting the source in raw-indexed mode:
//!
//! 1. a valueless source resets the destination
//! 2. if the destination holds the same alternative, the value is assigned
//!    in place (`*dst = src` or `dst.clone_from(src)`) without destroying
//!    and reconstructing it
//! 3. otherwise the new value is produced first, by moving or cloning, and
//!    only then is the old value replaced. A panicking `Clone` therefore
//!    leaves the destination untouched.

use core::ptr::NonNull;

use crate::{
    list::{Alt, Alternative, AlternativeList, for_each_arity},
    raw::RawVariant,
    visit::{Indexed, Valueless, Visitor, raw_visit_indexed},
};

/// A source value for the assignment algorithm.
pub trait AssignSource<T> {
    /// Assigns the source to a live value of the same alternative.
    fn assign_to(self, target: &mut T);

    /// Produces a new value from the source.
    fn into_value(self) -> T;
}

impl<T> AssignSource<T> for T {
    #[inline]
    fn assign_to(self, target: &mut T) {
        *target = self;
    }

    #[inline]
    fn into_value(self) -> T {
        self
    }
}

impl<T: Clone> AssignSource<T> for &T {
    #[inline]
    fn assign_to(self, target: &mut T) {
        target.clone_from(self);
    }

    #[inline]
    fn into_value(self) -> T {
        self.clone()
    }
}

/// Raw-indexed visitor assigning each source alternative to `dst`.
pub(crate) struct Assign<'d, L: AlternativeList> {
    /// The container being assigned to
    dst: &'d mut RawVariant<L>,
}

impl<L, S, const I: usize> Visitor<Indexed<I, S>> for Assign<'_, L>
where
    L: Alternative<I>,
    S: AssignSource<Alt<L, I>>,
{
    type Output = ();

    #[inline]
    fn visit(self, source: Indexed<I, S>) {
        if let Some(live) = self.dst.get_mut::<I>() {
            source.0.assign_to(live);
        } else {
            let value = source.0.into_value();
            self.dst.emplace::<I>(value);
        }
    }
}

impl<L: AlternativeList> Visitor<Valueless> for Assign<'_, L> {
    type Output = ();

    #[inline]
    fn visit(self, _source: Valueless) {
        self.dst.reset();
    }
}

/// Raw-indexed visitor cloning each source alternative into an empty `dst`.
pub(crate) struct CloneInto<'d, L: AlternativeList> {
    /// The container being constructed
    dst: &'d mut RawVariant<L>,
}

impl<'s, L, T, const I: usize> Visitor<Indexed<I, &'s T>> for CloneInto<'_, L>
where
    L: Alternative<I, Type = T>,
    T: Clone,
{
    type Output = ();

    #[inline]
    fn visit(self, source: Indexed<I, &'s T>) {
        self.dst.emplace::<I>(source.0.clone());
    }
}

impl<L: AlternativeList> Visitor<Valueless> for CloneInto<'_, L> {
    type Output = ();

    #[inline]
    fn visit(self, _source: Valueless) {}
}

/// Raw-indexed visitor running the destructor of the active alternative.
///
/// Only reachable through [`AlternativeList::destroy`], whose caller
/// guarantees that the pointer names a live value that is not used again.
pub(crate) struct Destroy;

impl<const I: usize, T> Visitor<Indexed<I, NonNull<T>>> for Destroy {
    type Output = ();

    #[inline]
    fn visit(self, value: Indexed<I, NonNull<T>>) {
        // SAFETY: `Destroy` is only dispatched by `AlternativeList::destroy`
        // with the `Pointer` category, whose caller guarantees that the cell
        // holds a live value and is treated as empty afterwards
        unsafe { value.0.drop_in_place() };
    }
}

impl Visitor<Valueless> for Destroy {
    type Output = ();

    #[inline]
    fn visit(self, _value: Valueless) {}
}

/// Lists whose containers can be copied.
///
/// # Safety
///
/// Implementors must return a container holding a clone of the active value
/// of the source, at the same index, or a valueless container for a
/// valueless source.
pub unsafe trait CopyConstructible: AlternativeList {
    /// Creates a copy of `src`.
    fn copy_construct(src: &RawVariant<Self>) -> RawVariant<Self>;
}

/// Lists whose containers can be copy-assigned.
///
/// # Safety
///
/// Implementors must leave `dst` holding a clone of the active value of
/// `src` at the same index, following the assignment algorithm described in
/// the [module documentation](self).
pub unsafe trait CopyAssignable: AlternativeList {
    /// Assigns a copy of `src` to `dst`.
    fn copy_assign(dst: &mut RawVariant<Self>, src: &RawVariant<Self>);
}

/// Lists whose containers can be move-constructed.
///
/// Every list qualifies: moving a container moves its bytes.
pub trait MoveConstructible: AlternativeList {}

impl<L: AlternativeList> MoveConstructible for L {}

/// Lists whose containers can be move-assigned.
///
/// # Safety
///
/// Implementors must leave `dst` holding the active value of `src` at the
/// same index, following the assignment algorithm described in the
/// [module documentation](self).
pub unsafe trait MoveAssignable: AlternativeList {
    /// Moves `src` into `dst`.
    fn move_assign(dst: &mut RawVariant<Self>, src: RawVariant<Self>);
}

/// Implements the copy and move capabilities for one tuple arity.
macro_rules! impl_smf {
    ($($A:ident $idx:tt),+) => {
        // SAFETY: Clones the active alternative into a fresh container at
        // the same index, through the raw-indexed `CloneInto` visitor.
        unsafe impl<$($A: Clone),+> CopyConstructible for ($($A,)+) {
            #[inline]
            fn copy_construct(src: &RawVariant<Self>) -> RawVariant<Self> {
                let mut dst = RawVariant::valueless();
                raw_visit_indexed(src, CloneInto { dst: &mut dst });
                dst
            }
        }

        // SAFETY: Runs the assignment algorithm with `&A` sources.
        unsafe impl<$($A: Clone),+> CopyAssignable for ($($A,)+) {
            #[inline]
            fn copy_assign(dst: &mut RawVariant<Self>, src: &RawVariant<Self>) {
                raw_visit_indexed(src, Assign { dst });
            }
        }

        // SAFETY: Overwrites `dst` when no alternative has drop glue, and
        // runs the assignment algorithm with owned sources otherwise.
        unsafe impl<$($A),+> MoveAssignable for ($($A,)+) {
            #[inline]
            fn move_assign(dst: &mut RawVariant<Self>, src: RawVariant<Self>) {
                if Self::NEEDS_DROP {
                    raw_visit_indexed(src, Assign { dst });
                } else {
                    *dst = src;
                }
            }
        }
    };
}

for_each_arity!(impl_smf);
