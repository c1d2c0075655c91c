//! Storage cell for a single alternative.
//!
//! [`AlternativeStorage<T>`] reserves space for one `T` without implying that
//! the lifetime of a `T` has begun. The cell itself never runs drop glue: the
//! owning container decides, using its discriminant, which cell is live and
//! when the value inside it is destroyed.
//!
//! # Safety Invariant
//!
//! The cell tracks nothing. Callers of the `unsafe` accessors promise that a
//! value was constructed with [`AlternativeStorage::construct`] and has not
//! yet been taken or destroyed.

use core::mem::MaybeUninit;

/// Possibly-uninitialized storage for one value of type `T`.
///
/// The layout is identical to the layout of `T`.
#[repr(transparent)]
pub struct AlternativeStorage<T> {
    /// The value, live only while the owning container says so
    value: MaybeUninit<T>,
}

impl<T> AlternativeStorage<T> {
    /// Creates a cell that does not hold a value.
    #[inline]
    pub const fn uninit() -> Self {
        Self {
            value: MaybeUninit::uninit(),
        }
    }

    /// Begins the lifetime of a value in this cell and returns a reference to
    /// it.
    ///
    /// If the cell already held a live value, that value is leaked.
    #[inline]
    pub fn construct(&mut self, value: T) -> &mut T {
        self.value.write(value)
    }

    /// Returns a reference to the value in this cell.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The cell holds a live value.
    #[inline]
    pub unsafe fn get(&self) -> &T {
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.value.assume_init_ref() }
    }

    /// Returns a mutable reference to the value in this cell.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The cell holds a live value.
    #[inline]
    pub unsafe fn get_mut(&mut self) -> &mut T {
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.value.assume_init_mut() }
    }

    /// Moves the value out of this cell, ending its lifetime in the cell.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The cell holds a live value.
    /// 2. The cell is treated as empty afterwards.
    #[inline]
    pub unsafe fn take(&mut self) -> T {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller, so the value is not duplicated
        unsafe { self.value.assume_init_read() }
    }

    /// Runs the destructor of the value in this cell.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The cell holds a live value.
    /// 2. The cell is treated as empty afterwards, even if the destructor
    ///    panics.
    #[inline]
    pub unsafe fn destroy(&mut self) {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { self.value.assume_init_drop() }
    }
}
