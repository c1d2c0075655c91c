//! Dispatch of a visitor to the active alternative of one storage block.
//!
//! [`Dispatch`] implements the deduced-return mode: the visitor must return
//! the same type for every alternative, which the trait bounds enforce at
//! compile time. [`RawDispatch`] implements the raw-indexed mode: the visitor
//! receives [`Indexed<I, _>`] arguments or [`Valueless`], and its return value
//! is discarded.
//!
//! Both traits dispatch in one of two ways:
//!
//! - lists with at most [`DIRECT_DISPATCH_LIMIT`] alternatives use a direct
//!   `match` on the discriminant when a single container is visited
//! - longer lists, and every dimension of a multi-container visit, index a
//!   `&'static` table of [`ErasedThunk`]s generated once per list, access
//!   category and visitor
//!
//! The raw table carries a leading slot for the valueless state unless the
//! list is [`NEVER_VALUELESS`]. The discriminant is offset by one before
//! indexing, so [`VARIANT_NPOS`] wraps around to that slot.
//!
//! # Safety Invariant
//!
//! The tables are only reachable through the associated constants defined in
//! this module, which are built from `erased_entry`/`raw_erased_entry`
//! instantiated with the same list, access category and visitor as the
//! implementation they belong to. `invoke` is the only caller of the thunks
//! and always passes the visitor and output pointers they expect.
//!
//! [`NEVER_VALUELESS`]: AlternativeList::NEVER_VALUELESS

use core::{
    hint::unreachable_unchecked,
    mem::{ManuallyDrop, MaybeUninit},
    ptr::NonNull,
};

use super::{Indexed, Valueless, Visitor, access::Access};
use crate::{
    list::{Alt, Alternative, AlternativeList, for_each_arity},
    util::{DIRECT_DISPATCH_LIMIT, Erased, ErasedThunk, VARIANT_NPOS},
};

/// Deduced-return dispatch of the visitor `V` with access category `C`.
///
/// Implemented for every list whose alternatives all produce a `C` argument
/// that `V` accepts with the same [`Visitor::Output`].
///
/// # Safety
///
/// Implementors must guarantee that `dispatch`, `dispatch_table` and every
/// entry of `TABLE` hand the visitor the cell of the alternative named by the
/// discriminant, projected with `C`.
pub unsafe trait Dispatch<C, V>: AlternativeList {
    /// The common return type of the visitor.
    type Output;

    /// One entry per alternative, in index order.
    #[doc(hidden)]
    const TABLE: &'static [ErasedThunk];

    /// Visits alternative `index`, with a direct branch for short lists.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `index < Self::LEN` and the cell of alternative `index` in
    ///    `*storage` holds a live value.
    /// 2. `storage` is valid for the access performed by `C`, for as long as
    ///    the arguments produced by `C` are used.
    /// 3. If `C` moves values out, the cell is treated as empty afterwards.
    unsafe fn dispatch(storage: NonNull<Self::Storage>, index: usize, visitor: V) -> Self::Output;

    /// Visits alternative `index` through the generated table.
    ///
    /// # Safety
    ///
    /// Same requirements as [`Dispatch::dispatch`].
    #[inline]
    unsafe fn dispatch_table(
        storage: NonNull<Self::Storage>,
        index: usize,
        visitor: V,
    ) -> Self::Output {
        // SAFETY:
        // 1. `index < Self::LEN == Self::TABLE.len()`, guaranteed by the caller
        let thunk = unsafe { *Self::TABLE.get_unchecked(index) };
        // SAFETY: `thunk` is `erased_entry::<Self, C, V, Self::Output, index>`,
        // whose requirements are guaranteed by the caller
        unsafe { invoke::<V, Self::Output>(thunk, storage.cast::<Erased>(), visitor) }
    }
}

/// Raw-indexed dispatch of the visitor `V` with access category `C`.
///
/// The visitor receives [`Indexed<I, C::Arg>`](Indexed) for alternative `I`
/// and [`Valueless`] for the valueless state. Its return values are
/// discarded.
///
/// # Safety
///
/// Implementors must guarantee that `raw_dispatch`, `raw_dispatch_table` and
/// every entry of `RAW_SLOTS` hand the visitor the cell of the alternative
/// named by the discriminant, projected with `C`, and that the first entry
/// of `RAW_SLOTS` is the valueless entry.
pub unsafe trait RawDispatch<C, V>: AlternativeList {
    /// The valueless entry followed by one entry per alternative.
    #[doc(hidden)]
    const RAW_SLOTS: &'static [ErasedThunk];

    /// [`RawDispatch::RAW_SLOTS`] without the valueless entry when the list
    /// cannot become valueless.
    #[doc(hidden)]
    const RAW_TABLE: &'static [ErasedThunk] = if Self::NEVER_VALUELESS {
        Self::RAW_SLOTS.split_at(1).1
    } else {
        Self::RAW_SLOTS
    };

    /// Visits alternative `index`, or the valueless state, with a direct
    /// branch for short lists.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Either `index < Self::LEN` and the cell of alternative `index` in
    ///    `*storage` holds a live value, or `index == VARIANT_NPOS` and the
    ///    list is not `NEVER_VALUELESS`.
    /// 2. `storage` is valid for the access performed by `C`, for as long as
    ///    the arguments produced by `C` are used.
    /// 3. If `C` moves values out, the cell is treated as empty afterwards.
    unsafe fn raw_dispatch(storage: NonNull<Self::Storage>, index: usize, visitor: V);

    /// Visits alternative `index`, or the valueless state, through the
    /// generated table.
    ///
    /// # Safety
    ///
    /// Same requirements as [`RawDispatch::raw_dispatch`].
    #[inline]
    unsafe fn raw_dispatch_table(storage: NonNull<Self::Storage>, index: usize, visitor: V) {
        let slot = if Self::NEVER_VALUELESS {
            index
        } else {
            index.wrapping_add(1)
        };
        // SAFETY:
        // 1. `slot` is in bounds: alternatives occupy `0..LEN` of the table
        //    without a valueless entry and `1..=LEN` with one, where
        //    `VARIANT_NPOS` wraps around to `0`
        let thunk = unsafe { *Self::RAW_TABLE.get_unchecked(slot) };
        // SAFETY: `thunk` is the raw entry of alternative `index`, or the
        // valueless entry, whose requirements are guaranteed by the caller
        unsafe { invoke::<V, ()>(thunk, storage.cast::<Erased>(), visitor) }
    }
}

/// Calls a table entry, handing it the visitor and receiving its output.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `thunk` reads a `V` from its second argument and writes an `R` to its
///    third argument.
/// 2. The requirements `thunk` places on `storage` are met.
#[inline]
unsafe fn invoke<V, R>(thunk: ErasedThunk, storage: NonNull<Erased>, visitor: V) -> R {
    let mut visitor = ManuallyDrop::new(visitor);
    let mut output = MaybeUninit::<R>::uninit();
    // SAFETY:
    // 1. Guaranteed by the caller. The visitor is wrapped in `ManuallyDrop`,
    //    so moving it out inside `thunk` does not lead to a double drop
    // 2. Guaranteed by the caller
    unsafe {
        thunk(
            storage,
            NonNull::from(&mut *visitor).cast::<Erased>(),
            NonNull::from(&mut output).cast::<Erased>(),
        );
    }
    // SAFETY: `thunk` returned normally, so it wrote the output
    unsafe { output.assume_init() }
}

/// Typed entry for alternative `I`: projects the cell and visits it.
///
/// # Safety
///
/// Same requirements as [`Dispatch::dispatch`] with `index == I`.
#[inline(always)]
unsafe fn entry<L, C, V, const I: usize>(
    storage: NonNull<L::Storage>,
    visitor: V,
) -> <V as Visitor<<C as Access<Alt<L, I>>>::Arg>>::Output
where
    L: Alternative<I>,
    C: Access<Alt<L, I>>,
    V: Visitor<<C as Access<Alt<L, I>>>::Arg>,
{
    let cell = <L as Alternative<I>>::project(storage);
    // SAFETY: Guaranteed by the caller
    let arg = unsafe { C::project(cell) };
    visitor.visit(arg)
}

/// Typed raw entry for alternative `I`: projects the cell and visits it as
/// [`Indexed<I, _>`](Indexed).
///
/// # Safety
///
/// Same requirements as [`RawDispatch::raw_dispatch`] with `index == I`.
#[inline(always)]
unsafe fn raw_entry<L, C, V, const I: usize>(storage: NonNull<L::Storage>, visitor: V)
where
    L: Alternative<I>,
    C: Access<Alt<L, I>>,
    V: Visitor<Indexed<I, <C as Access<Alt<L, I>>>::Arg>>,
{
    let cell = <L as Alternative<I>>::project(storage);
    // SAFETY: Guaranteed by the caller
    let arg = unsafe { C::project(cell) };
    let _ = visitor.visit(Indexed(arg));
}

/// Erased form of [`entry`], stored in [`Dispatch::TABLE`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `storage` points to an `L::Storage` meeting the requirements of
///    [`entry`].
/// 2. `visitor` points to a `V` that the caller gives up ownership of.
/// 3. `output` points to a writable `MaybeUninit<R>`.
unsafe fn erased_entry<L, C, V, R, const I: usize>(
    storage: NonNull<Erased>,
    visitor: NonNull<Erased>,
    output: NonNull<Erased>,
) where
    L: Alternative<I>,
    C: Access<Alt<L, I>>,
    V: Visitor<<C as Access<Alt<L, I>>>::Arg, Output = R>,
{
    // SAFETY:
    // 2. Guaranteed by the caller
    let visitor = unsafe { visitor.cast::<V>().read() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let value = unsafe { entry::<L, C, V, I>(storage.cast::<L::Storage>(), visitor) };
    // SAFETY:
    // 3. Guaranteed by the caller
    unsafe { output.cast::<R>().write(value) };
}

/// Erased form of [`raw_entry`], stored in [`RawDispatch::RAW_SLOTS`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `storage` points to an `L::Storage` meeting the requirements of
///    [`raw_entry`].
/// 2. `visitor` points to a `V` that the caller gives up ownership of.
/// 3. `output` points to a writable `MaybeUninit<()>`.
unsafe fn raw_erased_entry<L, C, V, const I: usize>(
    storage: NonNull<Erased>,
    visitor: NonNull<Erased>,
    _output: NonNull<Erased>,
) where
    L: Alternative<I>,
    C: Access<Alt<L, I>>,
    V: Visitor<Indexed<I, <C as Access<Alt<L, I>>>::Arg>>,
{
    // SAFETY:
    // 2. Guaranteed by the caller
    let visitor = unsafe { visitor.cast::<V>().read() };
    // SAFETY:
    // 1. Guaranteed by the caller
    unsafe { raw_entry::<L, C, V, I>(storage.cast::<L::Storage>(), visitor) };
}

/// Valueless slot of [`RawDispatch::RAW_SLOTS`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `visitor` points to a `V` that the caller gives up ownership of.
unsafe fn valueless_erased_entry<V>(
    _storage: NonNull<Erased>,
    visitor: NonNull<Erased>,
    _output: NonNull<Erased>,
) where
    V: Visitor<Valueless>,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let visitor = unsafe { visitor.cast::<V>().read() };
    let _ = visitor.visit(Valueless);
}

/// Implements deduced and raw-indexed dispatch for one tuple arity.
macro_rules! impl_dispatch {
    ($($A:ident $idx:tt),+) => {
        // SAFETY: `TABLE` lists `erased_entry` for the indices `0..LEN` in
        // order, and the direct branch maps each index to the `entry` of the
        // same index.
        unsafe impl<C, V, R, $($A),+> Dispatch<C, V> for ($($A,)+)
        where
            $(
                C: Access<$A>,
                V: Visitor<<C as Access<$A>>::Arg, Output = R>,
            )+
        {
            type Output = R;

            const TABLE: &'static [ErasedThunk] = &[
                $(erased_entry::<Self, C, V, R, $idx> as ErasedThunk),+
            ];

            #[inline]
            unsafe fn dispatch(storage: NonNull<Self::Storage>, index: usize, visitor: V) -> R {
                if Self::LEN <= DIRECT_DISPATCH_LIMIT {
                    match index {
                        $(
                            // SAFETY: Guaranteed by the caller
                            $idx => unsafe { entry::<Self, C, V, $idx>(storage, visitor) },
                        )+
                        // SAFETY: The caller guarantees `index < LEN`
                        _ => unsafe { unreachable_unchecked() },
                    }
                } else {
                    // SAFETY: Guaranteed by the caller
                    unsafe { <Self as Dispatch<C, V>>::dispatch_table(storage, index, visitor) }
                }
            }
        }

        // SAFETY: `RAW_SLOTS` starts with the valueless entry and continues
        // with `raw_erased_entry` for the indices `0..LEN` in order, and the
        // direct branch maps each index to the `raw_entry` of the same index.
        unsafe impl<C, V, $($A),+> RawDispatch<C, V> for ($($A,)+)
        where
            V: Visitor<Valueless>,
            $(
                C: Access<$A>,
                V: Visitor<Indexed<$idx, <C as Access<$A>>::Arg>>,
            )+
        {
            const RAW_SLOTS: &'static [ErasedThunk] = &[
                valueless_erased_entry::<V> as ErasedThunk,
                $(raw_erased_entry::<Self, C, V, $idx> as ErasedThunk),+
            ];

            #[inline]
            unsafe fn raw_dispatch(storage: NonNull<Self::Storage>, index: usize, visitor: V) {
                if Self::LEN <= DIRECT_DISPATCH_LIMIT {
                    match index {
                        $(
                            // SAFETY: Guaranteed by the caller
                            $idx => unsafe { raw_entry::<Self, C, V, $idx>(storage, visitor) },
                        )+
                        VARIANT_NPOS if !Self::NEVER_VALUELESS => {
                            let _ = <V as Visitor<Valueless>>::visit(visitor, Valueless);
                        }
                        // SAFETY: The caller guarantees `index < LEN`, or
                        // `VARIANT_NPOS` for lists that can be valueless
                        _ => unsafe { unreachable_unchecked() },
                    }
                } else {
                    // SAFETY: Guaranteed by the caller
                    unsafe {
                        <Self as RawDispatch<C, V>>::raw_dispatch_table(storage, index, visitor);
                    }
                }
            }
        }
    };
}

for_each_arity!(impl_dispatch);
