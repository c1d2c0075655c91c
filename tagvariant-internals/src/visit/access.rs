//! Access categories for visitation.
//!
//! An access category decides what a visitor receives for the active
//! alternative `T` of a container:
//!
//! | category          | argument       | source                  |
//! |-------------------|----------------|-------------------------|
//! | [`Shared<'a>`]    | `&'a T`        | `&'a RawVariant<L>`     |
//! | [`Exclusive<'a>`] | `&'a mut T`    | `&'a mut RawVariant<L>` |
//! | [`Owned`]         | `T`            | `RawVariant<L>`         |
//!
//! A fourth, crate-private category hands out raw pointers to the cell and is
//! only used to run destructors.
//!
//! [`Shared<'a>`]: Shared
//! [`Exclusive<'a>`]: Exclusive

use core::{marker::PhantomData, ptr::NonNull};

use crate::storage::AlternativeStorage;

/// Produces the visitor argument for a live cell of type `T`.
///
/// # Safety
///
/// Implementors must only read or move out of the cell in the way their
/// category promises to the container that handed out the cell.
pub unsafe trait Access<T> {
    /// The argument passed to the visitor.
    type Arg;

    /// Turns the cell into the visitor argument.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `cell` holds a live value.
    /// 2. `cell` is valid for the access the category performs, for as long
    ///    as the returned argument is used.
    /// 3. For [`Owned`], the cell is treated as empty afterwards.
    unsafe fn project(cell: NonNull<AlternativeStorage<T>>) -> Self::Arg;
}

/// Shared access: the visitor receives `&'a T`.
#[derive(Clone, Copy, Debug)]
pub struct Shared<'a>(PhantomData<&'a ()>);

/// Exclusive access: the visitor receives `&'a mut T`.
#[derive(Debug)]
pub struct Exclusive<'a>(PhantomData<&'a mut ()>);

/// Owned access: the visitor receives `T`, consuming the container.
#[derive(Clone, Copy, Debug)]
pub struct Owned;

/// Pointer access: the visitor receives `NonNull<T>` to the live value.
pub(crate) struct Pointer;

// SAFETY: Only reads through the cell.
unsafe impl<'a, T: 'a> Access<T> for Shared<'a> {
    type Arg = &'a T;

    #[inline(always)]
    unsafe fn project(cell: NonNull<AlternativeStorage<T>>) -> &'a T {
        // SAFETY:
        // 2. Guaranteed by the caller for `'a`
        let cell: &'a AlternativeStorage<T> = unsafe { cell.as_ref() };
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { cell.get() }
    }
}

// SAFETY: Hands out the only reference to the cell for `'a`.
unsafe impl<'a, T: 'a> Access<T> for Exclusive<'a> {
    type Arg = &'a mut T;

    #[inline(always)]
    unsafe fn project(mut cell: NonNull<AlternativeStorage<T>>) -> &'a mut T {
        // SAFETY:
        // 2. Guaranteed by the caller for `'a`
        let cell: &'a mut AlternativeStorage<T> = unsafe { cell.as_mut() };
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { cell.get_mut() }
    }
}

// SAFETY: Moves the value out; the caller forgets the cell afterwards.
unsafe impl<T> Access<T> for Owned {
    type Arg = T;

    #[inline(always)]
    unsafe fn project(mut cell: NonNull<AlternativeStorage<T>>) -> T {
        // SAFETY:
        // 2. Guaranteed by the caller
        let cell: &mut AlternativeStorage<T> = unsafe { cell.as_mut() };
        // SAFETY:
        // 1. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe { cell.take() }
    }
}

// SAFETY: The pointer is only created here; the visitors receiving it are
// crate-private and document what they do with it.
unsafe impl<T> Access<T> for Pointer {
    type Arg = NonNull<T>;

    #[inline(always)]
    unsafe fn project(cell: NonNull<AlternativeStorage<T>>) -> NonNull<T> {
        cell.cast::<T>()
    }
}
