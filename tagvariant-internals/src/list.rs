//! Alternative lists and their compile-time properties.
//!
//! An alternative list is a tuple `(A0, A1, ..., An-1)` with between 1 and
//! [`MAX_ALTERNATIVES`] elements. The traits in this module are implemented
//! for every such tuple and expose:
//!
//! - [`AlternativeList`]: the storage block, the alternative count and the
//!   flags that select trivial or visit-based lifecycle operations
//! - [`Alternative<I>`]: the type of alternative `I` and the projection to its
//!   cell
//! - [`Contains<T, Idx>`]: type-keyed lookup. The index is inferred through
//!   `Idx`, so a type that occurs more than once in the list is rejected at
//!   compile time as ambiguous.
//!
//! There is no implementation for `()`; a container must have at least one
//! alternative.
//!
//! [`MAX_ALTERNATIVES`]: crate::util::MAX_ALTERNATIVES

use core::ptr::NonNull;

use crate::storage::{AlternativeStorage, Here, There};

/// A tuple of alternative types that a container can hold.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// 1. `Storage` holds a cell for each of the `LEN` alternatives, reachable
///    through the matching [`Alternative`] implementation.
/// 2. `NEEDS_DROP` is `true` if any alternative has drop glue.
/// 3. `NEVER_VALUELESS` is only `true` when no alternative has drop glue, so a
///    container can never be interrupted halfway through a replacement.
/// 4. `destroy` runs the destructor of exactly the alternative named by
///    `index`.
pub unsafe trait AlternativeList: Sized {
    /// The overlapping storage cells of all alternatives.
    type Storage;

    /// Number of alternatives.
    const LEN: usize;

    /// Whether destroying any alternative runs code.
    const NEEDS_DROP: bool;

    /// Whether containers over this list provably never become valueless.
    ///
    /// This holds when every alternative is at most
    /// [`NEVER_VALUELESS_SIZE_LIMIT`] bytes large and has no drop glue.
    ///
    /// [`NEVER_VALUELESS_SIZE_LIMIT`]: crate::util::NEVER_VALUELESS_SIZE_LIMIT
    const NEVER_VALUELESS: bool;

    /// Creates a storage block in which no cell holds a value.
    fn uninit() -> Self::Storage;

    /// Returns the type name of the alternative at `index`, if there is one.
    fn type_name(index: usize) -> Option<&'static str>;

    /// Runs the destructor of the alternative at `index`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `index < Self::LEN`.
    /// 2. The cell of alternative `index` in `*storage` holds a live value.
    /// 3. The cell is treated as empty afterwards, even if the destructor
    ///    panics.
    unsafe fn destroy(storage: NonNull<Self::Storage>, index: usize);
}

/// Access to the alternative at position `I` of a list.
///
/// # Safety
///
/// Implementors must guarantee that [`Alternative::project`] returns the cell
/// of alternative `I`, derived from the given storage pointer.
pub unsafe trait Alternative<const I: usize>: AlternativeList {
    /// The type of alternative `I`.
    type Type;

    /// Returns a pointer to the cell of alternative `I`.
    fn project(storage: NonNull<Self::Storage>) -> NonNull<AlternativeStorage<Self::Type>>;
}

/// The type of alternative `I` of the list `L`.
pub type Alt<L, const I: usize> = <L as Alternative<I>>::Type;

/// Type-keyed access to the single alternative of type `T`.
///
/// `Idx` is always an [`Index<I>`]; it is left to inference so that lookups
/// of a type that is not unique in the list fail to compile.
///
/// # Safety
///
/// Implementors must guarantee that alternative `INDEX` has type `T` and that
/// [`Contains::project`] returns its cell.
pub unsafe trait Contains<T, Idx>: AlternativeList {
    /// Position of `T` in the list.
    const INDEX: usize;

    /// Returns a pointer to the cell of `T`.
    fn project(storage: NonNull<Self::Storage>) -> NonNull<AlternativeStorage<T>>;
}

/// Type-level position used to infer the index of a [`Contains`] lookup.
#[derive(Clone, Copy, Debug)]
pub struct Index<const I: usize>;

/// Maps an [`Index<I>`] to the [`Here`]/[`There`] path of the `I`-th
/// [`RecursiveUnion`] level.
///
/// [`RecursiveUnion`]: crate::storage::RecursiveUnion
pub trait IndexPath {
    /// The path reaching level `I`.
    type Path;
}

/// Implements [`IndexPath`] for each index, nesting one more `There` per level.
macro_rules! index_paths {
    ($path:ty;) => {};
    ($path:ty; $idx:tt $(, $rest:tt)*) => {
        impl IndexPath for Index<$idx> {
            type Path = $path;
        }

        index_paths!(There<$path>; $($rest),*);
    };
}

index_paths!(Here; 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);

/// Invokes `$m!` once per supported arity with the alternative type names and
/// their indices, e.g. `$m!(A0 0, A1 1, A2 2)`.
macro_rules! for_each_arity {
    ($m:ident) => {
        $crate::list::for_each_arity!(@step $m []
            A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7,
            A8 8, A9 9, A10 10, A11 11, A12 12, A13 13, A14 14, A15 15
        );
    };
    (@step $m:ident [$($done:tt)*]) => {};
    (@step $m:ident [$($done:tt)*] $A:ident $idx:tt $(, $rest:ident $rest_idx:tt)*) => {
        $m!($($done)* $A $idx);
        $crate::list::for_each_arity!(@step $m [$($done)* $A $idx,] $($rest $rest_idx),*);
    };
}

pub(crate) use for_each_arity;

/// The [`RecursiveUnion`](crate::storage::RecursiveUnion) type storing the
/// given alternatives.
macro_rules! union_of {
    () => { $crate::storage::End };
    ($A:ident $(, $rest:ident)*) => {
        $crate::storage::RecursiveUnion<$A, union_of!($($rest),*)>
    };
}

/// Implements the list traits for one tuple arity.
macro_rules! impl_list {
    ($($A:ident $idx:tt),+) => {
        impl_list!(@list ($($A),+) $($A $idx),+);
    };
    (@list $all:tt $($A:ident $idx:tt),+) => {
        // SAFETY:
        // 1. `union_of!` nests one cell per alternative, and the
        //    `Alternative` impls below follow the matching paths.
        // 2. `NEEDS_DROP` is the disjunction of `needs_drop` over all
        //    alternatives.
        // 3. `NEVER_VALUELESS` requires `!needs_drop` for every alternative.
        // 4. `destroy` dispatches on `index` with the `Destroy` visitor, which
        //    drops the projected cell of that index only.
        unsafe impl<$($A),+> AlternativeList for ($($A,)+) {
            type Storage = union_of!($($A),+);

            const LEN: usize = [$($idx),+].len();

            const NEEDS_DROP: bool = false $(|| core::mem::needs_drop::<$A>())+;

            const NEVER_VALUELESS: bool = true $(
                && core::mem::size_of::<$A>() <= $crate::util::NEVER_VALUELESS_SIZE_LIMIT
                && !core::mem::needs_drop::<$A>()
            )+;

            #[inline]
            fn uninit() -> Self::Storage {
                $crate::storage::RecursiveUnion::uninit()
            }

            fn type_name(index: usize) -> Option<&'static str> {
                [$(core::any::type_name::<$A>()),+].get(index).copied()
            }

            #[inline]
            unsafe fn destroy(storage: NonNull<Self::Storage>, index: usize) {
                // SAFETY:
                // 1. Guaranteed by the caller
                // 2. Guaranteed by the caller, so the `Pointer` projection of
                //    alternative `index` points to a live value
                // 3. Guaranteed by the caller
                unsafe {
                    <Self as $crate::visit::RawDispatch<
                        $crate::visit::access::Pointer,
                        $crate::smf::Destroy,
                    >>::raw_dispatch(storage, index, $crate::smf::Destroy);
                }
            }
        }

        $(impl_list!(@alt $all $A $idx);)+
    };
    (@alt ($($T:ident),+) $A:ident $idx:tt) => {
        // SAFETY: `Index<$idx>` maps to the path of the `$idx`-th level of
        // `union_of!`, whose first cell stores `$A`.
        unsafe impl<$($T),+> Alternative<$idx> for ($($T,)+) {
            type Type = $A;

            #[inline(always)]
            fn project(
                storage: NonNull<Self::Storage>,
            ) -> NonNull<AlternativeStorage<$A>> {
                <Self::Storage as $crate::storage::UnionAt<
                    <Index<$idx> as IndexPath>::Path,
                >>::project(storage)
            }
        }

        // SAFETY: Forwards to `Alternative<$idx>`, whose type is `$A`.
        unsafe impl<$($T),+> Contains<$A, Index<$idx>> for ($($T,)+) {
            const INDEX: usize = $idx;

            #[inline(always)]
            fn project(
                storage: NonNull<Self::Storage>,
            ) -> NonNull<AlternativeStorage<$A>> {
                <Self as Alternative<$idx>>::project(storage)
            }
        }
    };
}

for_each_arity!(impl_list);

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::mem::{align_of, size_of};

    use super::*;

    type Small = (u8, u32, [u16; 3]);
    type Large = (String, [u8; 300]);

    fn index_of<L: Contains<T, Idx>, T, Idx>() -> usize {
        L::INDEX
    }

    #[test]
    fn test_list_constants() {
        assert_eq!(<(u8,)>::LEN, 1);
        assert_eq!(<Small>::LEN, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8)>::LEN,
            16
        );
        assert!(!<Small>::NEEDS_DROP);
        assert!(<Small>::NEVER_VALUELESS);
        assert!(<Large>::NEEDS_DROP);
        assert!(!<Large>::NEVER_VALUELESS);
        assert!(!<([u8; 257],)>::NEVER_VALUELESS);
        assert!(<([u8; 256],)>::NEVER_VALUELESS);
    }

    #[test]
    fn test_list_storage_layout() {
        type Storage = <Small as AlternativeList>::Storage;
        assert_eq!(size_of::<Storage>(), 8);
        assert_eq!(align_of::<Storage>(), 4);
    }

    #[test]
    fn test_list_projections_share_the_block_address() {
        let mut storage = <Small as AlternativeList>::uninit();
        let base = NonNull::from(&mut storage);
        assert_eq!(
            <Small as Alternative<2>>::project(base).cast::<u8>(),
            base.cast::<u8>()
        );
        assert_eq!(
            <Small as Contains<u32, _>>::project(base).cast::<u8>(),
            base.cast::<u8>()
        );
    }

    #[test]
    fn test_list_type_lookup() {
        assert_eq!(index_of::<Small, u8, _>(), 0);
        assert_eq!(index_of::<Small, u32, _>(), 1);
        assert_eq!(index_of::<Small, [u16; 3], _>(), 2);
        assert_eq!(index_of::<(u8, u8), u8, Index<1>>(), 1);
    }

    #[test]
    fn test_list_type_names() {
        assert_eq!(<Small>::type_name(1), Some("u32"));
        assert_eq!(<Small>::type_name(3), None);
        assert_eq!(
            <Large>::type_name(0),
            Some(core::any::type_name::<String>())
        );
    }

    #[test]
    fn test_list_alternative_types() {
        static_assertions::assert_type_eq_all!(Alt<Small, 0>, u8);
        static_assertions::assert_type_eq_all!(Alt<Small, 2>, [u16; 3]);
    }
}
