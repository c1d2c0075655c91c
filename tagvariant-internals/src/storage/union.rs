//! Nested union holding the storage cells of every alternative of a list.
//!
//! A list `(A0, A1, A2)` is stored in
//! `RecursiveUnion<A0, RecursiveUnion<A1, RecursiveUnion<A2, End>>>`. Each
//! level overlaps the cell of its first alternative with the union of the
//! remaining ones, so the whole block is as large and as aligned as the
//! largest alternative.
//!
//! Alternative `I` is reached by following a type-level path of `I`
//! [`There`] steps terminated by [`Here`], see [`UnionAt`]. The steps are
//! resolved at compile time and collapse to a single pointer cast.
//!
//! # Safety Invariant
//!
//! Both unions are `#[repr(C)]`, so every field of every level starts at
//! offset zero of the block. [`UnionAt::project`] relies on this to turn a
//! pointer to the block into a pointer to any of the cells.

use core::{mem::ManuallyDrop, ptr::NonNull};

use super::slot::AlternativeStorage;

/// Storage block for the alternative `F` followed by the alternatives stored
/// in `R`.
///
/// `R` is either another [`RecursiveUnion`] or [`End`].
#[repr(C)]
pub union RecursiveUnion<F, R> {
    /// Cell of the first alternative at this level
    first: ManuallyDrop<AlternativeStorage<F>>,
    /// Cells of the remaining alternatives
    rest: ManuallyDrop<R>,
}

impl<F, R> RecursiveUnion<F, R> {
    /// Creates a storage block in which no cell holds a value.
    #[inline]
    pub const fn uninit() -> Self {
        Self {
            first: ManuallyDrop::new(AlternativeStorage::uninit()),
        }
    }
}

/// Terminator of a [`RecursiveUnion`] chain.
#[derive(Clone, Copy, Debug)]
pub struct End;

/// Path step selecting the first alternative of a [`RecursiveUnion`] level.
#[derive(Clone, Copy, Debug)]
pub struct Here;

/// Path step skipping the first alternative of a [`RecursiveUnion`] level and
/// continuing with `P` in the remaining levels.
#[derive(Debug)]
pub struct There<P>(core::marker::PhantomData<P>);

/// Projection from a storage block to the cell selected by the path `P`.
///
/// # Safety
///
/// Implementors must return a pointer to the cell of [`UnionAt::Target`]
/// inside the block, derived from the block pointer they were given.
pub unsafe trait UnionAt<P> {
    /// Alternative stored in the selected cell.
    type Target;

    /// Returns a pointer to the selected cell.
    ///
    /// The pointer is only computed, never dereferenced.
    fn project(block: NonNull<Self>) -> NonNull<AlternativeStorage<Self::Target>>;
}

// SAFETY: `first` sits at offset zero of the `#[repr(C)]` union and
// `ManuallyDrop` is `#[repr(transparent)]`.
unsafe impl<F, R> UnionAt<Here> for RecursiveUnion<F, R> {
    type Target = F;

    #[inline(always)]
    fn project(block: NonNull<Self>) -> NonNull<AlternativeStorage<F>> {
        block.cast::<AlternativeStorage<F>>()
    }
}

// SAFETY: `rest` sits at offset zero of the `#[repr(C)]` union and
// `ManuallyDrop` is `#[repr(transparent)]`, so the cast yields a pointer to
// the next level, which `R::project` is trusted to handle.
unsafe impl<F, R, P> UnionAt<There<P>> for RecursiveUnion<F, R>
where
    R: UnionAt<P>,
{
    type Target = R::Target;

    #[inline(always)]
    fn project(block: NonNull<Self>) -> NonNull<AlternativeStorage<R::Target>> {
        R::project(block.cast::<R>())
    }
}
