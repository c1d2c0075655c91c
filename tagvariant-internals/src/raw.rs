//! The indexed container: a storage block paired with its discriminant.
//!
//! This module encapsulates the `storage` and `index` fields of
//! [`RawVariant`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the
//! discriminant always names the cell that holds the live value, or is
//! [`VARIANT_NPOS`] and no cell holds a value**.
//!
//! # Safety Invariant
//!
//! Every method that writes a cell updates the discriminant in the same
//! call:
//!
//! - [`RawVariant::reset`] sets the discriminant to [`VARIANT_NPOS`] *before*
//!   running the destructor, so a panicking destructor leaves a valueless
//!   container rather than a dangling discriminant
//! - [`RawVariant::emplace`] resets first and sets the discriminant right
//!   after moving the new value into its cell, which cannot fail
//!
//! For lists that are [`NEVER_VALUELESS`] no destructor runs at all, so the
//! sentinel is never observable through the public methods and
//! [`RawVariant::is_valid`] folds to `true`.
//!
//! [`NEVER_VALUELESS`]: AlternativeList::NEVER_VALUELESS

use core::{
    mem::{self, ManuallyDrop},
    ptr::NonNull,
};

use crate::{
    list::{Alt, Alternative, AlternativeList, Contains},
    storage::AlternativeStorage,
    util::VARIANT_NPOS,
    visit::{Exclusive, Owned, Place, Shared},
};

/// Projection from a storage block to one of its cells.
type Projection<L, T> =
    fn(NonNull<<L as AlternativeList>::Storage>) -> NonNull<AlternativeStorage<T>>;

/// A discriminated union over the alternatives of `L`.
///
/// This is the raw counterpart of the public container: it owns the value and
/// runs its destructor, but leaves copying and assignment to the capability
/// traits of [`smf`](crate::smf).
pub struct RawVariant<L: AlternativeList> {
    /// The cells of all alternatives
    ///
    /// # Safety
    ///
    /// At most the cell named by `index` holds a live value.
    storage: L::Storage,
    /// The active alternative, or [`VARIANT_NPOS`]
    ///
    /// # Safety
    ///
    /// If `index != VARIANT_NPOS`, then `index < L::LEN` and the cell of
    /// alternative `index` holds a live value.
    index: usize,
}

impl<L: AlternativeList> RawVariant<L> {
    /// Creates a container holding `value` as alternative `I`.
    #[inline]
    pub fn new<const I: usize>(value: Alt<L, I>) -> Self
    where
        L: Alternative<I>,
    {
        let mut this = Self::valueless();
        this.place(I, <L as Alternative<I>>::project, value);
        this
    }

    /// Creates a container holding `value` as the alternative of type `T`.
    #[inline]
    pub fn new_as<T, Idx>(value: T) -> Self
    where
        L: Contains<T, Idx>,
    {
        let mut this = Self::valueless();
        this.place(
            <L as Contains<T, Idx>>::INDEX,
            <L as Contains<T, Idx>>::project,
            value,
        );
        this
    }

    /// Creates a container that holds no alternative.
    ///
    /// For `NEVER_VALUELESS` lists the result must be filled by
    /// [`RawVariant::emplace`] before it is visited or handed out.
    #[inline]
    pub(crate) fn valueless() -> Self {
        Self {
            storage: L::uninit(),
            index: VARIANT_NPOS,
        }
    }

    /// Returns the index of the active alternative, or [`VARIANT_NPOS`].
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns whether the container holds an alternative.
    ///
    /// Always `true` for `NEVER_VALUELESS` lists.
    #[inline]
    pub fn is_valid(&self) -> bool {
        L::NEVER_VALUELESS || self.index != VARIANT_NPOS
    }

    /// Destroys the active value, leaving the container valueless.
    ///
    /// The discriminant is cleared before the destructor runs. If the
    /// destructor panics, the container stays valueless and the panic
    /// continues to unwind.
    pub(crate) fn reset(&mut self) {
        if !self.is_valid() {
            return;
        }
        let index = mem::replace(&mut self.index, VARIANT_NPOS);
        if L::NEEDS_DROP && index != VARIANT_NPOS {
            #[cfg(feature = "tracing")]
            let guard = ValuelessGuard::<L>::new(index);

            // SAFETY:
            // 1. `index` was the discriminant and not `VARIANT_NPOS`, so it is
            //    below `L::LEN`
            // 2. The discriminant named this cell, so it holds a live value
            // 3. The discriminant is now `VARIANT_NPOS`, so the cell is treated
            //    as empty
            unsafe { L::destroy(NonNull::from(&mut self.storage), index) };

            #[cfg(feature = "tracing")]
            mem::forget(guard);
        }
    }

    /// Moves `value` into the cell reached by `project` and makes `index`
    /// the active alternative.
    #[inline]
    fn place<T>(&mut self, index: usize, project: Projection<L, T>, value: T) -> &mut T {
        self.reset();
        let mut cell = project(NonNull::from(&mut self.storage));
        self.index = index;
        // SAFETY: The cell lives in `self.storage`, which is borrowed mutably
        // for the lifetime of the returned reference
        let cell = unsafe { cell.as_mut() };
        cell.construct(value)
    }

    /// Returns the cell reached by `project` if `index` is active.
    #[inline]
    fn slot<T>(&self, index: usize, project: Projection<L, T>) -> Option<&T> {
        if self.index != index {
            return None;
        }
        let cell = project(NonNull::from(&self.storage));
        // SAFETY: The cell lives in `self.storage`, which is borrowed for the
        // lifetime of the returned reference
        let cell = unsafe { cell.as_ref() };
        // SAFETY: `index` is active, so its cell holds a live value
        Some(unsafe { cell.get() })
    }

    /// Returns the cell reached by `project` mutably if `index` is active.
    #[inline]
    fn slot_mut<T>(&mut self, index: usize, project: Projection<L, T>) -> Option<&mut T> {
        if self.index != index {
            return None;
        }
        let mut cell = project(NonNull::from(&mut self.storage));
        // SAFETY: The cell lives in `self.storage`, which is borrowed mutably
        // for the lifetime of the returned reference
        let cell = unsafe { cell.as_mut() };
        // SAFETY: `index` is active, so its cell holds a live value
        Some(unsafe { cell.get_mut() })
    }

    /// Replaces the active value with `value` as alternative `I` and returns
    /// a reference to it.
    ///
    /// The old value is destroyed first. If its destructor panics, the
    /// container is left valueless and `value` is dropped during unwinding.
    #[inline]
    pub fn emplace<const I: usize>(&mut self, value: Alt<L, I>) -> &mut Alt<L, I>
    where
        L: Alternative<I>,
    {
        self.place(I, <L as Alternative<I>>::project, value)
    }

    /// Replaces the active value with `value` as the alternative of type `T`.
    #[inline]
    pub fn emplace_as<T, Idx>(&mut self, value: T) -> &mut T
    where
        L: Contains<T, Idx>,
    {
        self.place(<L as Contains<T, Idx>>::INDEX, <L as Contains<T, Idx>>::project, value)
    }

    /// Returns alternative `I` if it is active.
    #[inline]
    pub fn get<const I: usize>(&self) -> Option<&Alt<L, I>>
    where
        L: Alternative<I>,
    {
        self.slot(I, <L as Alternative<I>>::project)
    }

    /// Returns alternative `I` mutably if it is active.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> Option<&mut Alt<L, I>>
    where
        L: Alternative<I>,
    {
        self.slot_mut(I, <L as Alternative<I>>::project)
    }

    /// Returns the alternative of type `T` if it is active.
    #[inline]
    pub fn get_as<T, Idx>(&self) -> Option<&T>
    where
        L: Contains<T, Idx>,
    {
        self.slot(<L as Contains<T, Idx>>::INDEX, <L as Contains<T, Idx>>::project)
    }

    /// Returns the alternative of type `T` mutably if it is active.
    #[inline]
    pub fn get_as_mut<T, Idx>(&mut self) -> Option<&mut T>
    where
        L: Contains<T, Idx>,
    {
        self.slot_mut(<L as Contains<T, Idx>>::INDEX, <L as Contains<T, Idx>>::project)
    }

    /// Moves alternative `I` out of the container, or gives the container
    /// back if another alternative is active.
    #[inline]
    pub fn into_inner<const I: usize>(self) -> Result<Alt<L, I>, Self>
    where
        L: Alternative<I>,
    {
        if self.index != I {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        let mut cell = <L as Alternative<I>>::project(NonNull::from(&mut this.storage));
        // SAFETY: The cell lives in `this.storage`, which outlives this call
        let cell = unsafe { cell.as_mut() };
        // SAFETY: `I` is active, so its cell holds a live value. The
        // container is never dropped, so the cell is not used again
        Ok(unsafe { cell.take() })
    }
}

impl<L: AlternativeList> Drop for RawVariant<L> {
    #[inline]
    fn drop(&mut self) {
        if L::NEEDS_DROP {
            self.reset();
        }
    }
}

// SAFETY:
// 1. Passes the storage and discriminant of the container
// 2. The storage is borrowed for `'a`, which bounds the `&'a T` arguments
// 3. `Shared` does not move values out
// 4. Follows `RawVariant::is_valid`
unsafe impl<'a, L: AlternativeList> Place for &'a RawVariant<L> {
    type List = L;
    type Category = Shared<'a>;

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn is_valid(&self) -> bool {
        RawVariant::is_valid(self)
    }

    #[inline]
    fn enter<R>(self, f: impl FnOnce(NonNull<L::Storage>, usize) -> R) -> R {
        f(NonNull::from(&self.storage), self.index)
    }
}

// SAFETY:
// 1. Passes the storage and discriminant of the container
// 2. The storage is borrowed mutably for `'a`, which bounds the `&'a mut T`
//    arguments
// 3. `Exclusive` does not move values out
// 4. Follows `RawVariant::is_valid`
unsafe impl<'a, L: AlternativeList> Place for &'a mut RawVariant<L> {
    type List = L;
    type Category = Exclusive<'a>;

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn is_valid(&self) -> bool {
        RawVariant::is_valid(self)
    }

    #[inline]
    fn enter<R>(self, f: impl FnOnce(NonNull<L::Storage>, usize) -> R) -> R {
        let index = self.index;
        f(NonNull::from(&mut self.storage), index)
    }
}

// SAFETY:
// 1. Passes the storage and discriminant of the container
// 2. The storage lives in `enter` until `f` returns, and `Owned` arguments
//    are values that do not borrow it
// 3. The container is wrapped in `ManuallyDrop` and never touched again
// 4. Follows `RawVariant::is_valid`
unsafe impl<L: AlternativeList> Place for RawVariant<L> {
    type List = L;
    type Category = Owned;

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn is_valid(&self) -> bool {
        RawVariant::is_valid(self)
    }

    #[inline]
    fn enter<R>(self, f: impl FnOnce(NonNull<L::Storage>, usize) -> R) -> R {
        let mut this = ManuallyDrop::new(self);
        let index = this.index;
        f(NonNull::from(&mut this.storage), index)
    }
}

/// Reports a container that became valueless because a destructor panicked.
///
/// Armed for the duration of a destructor call and forgotten afterwards, so
/// its own destructor only runs while unwinding out of the destructor call.
#[cfg(feature = "tracing")]
struct ValuelessGuard<L: AlternativeList> {
    /// The alternative whose destructor is running
    index: usize,
    /// The list of the container
    _list: core::marker::PhantomData<fn() -> L>,
}

#[cfg(feature = "tracing")]
impl<L: AlternativeList> ValuelessGuard<L> {
    /// Arms the guard for the destructor of alternative `index`.
    fn new(index: usize) -> Self {
        Self {
            index,
            _list: core::marker::PhantomData,
        }
    }
}

#[cfg(feature = "tracing")]
impl<L: AlternativeList> Drop for ValuelessGuard<L> {
    fn drop(&mut self) {
        tracing::warn!(
            target: "tagvariant",
            index = self.index,
            alternative = L::type_name(self.index).unwrap_or("<unknown>"),
            "destructor panicked, container is now valueless"
        );
    }
}
