//! Internal utility types and constants shared by the storage, dispatch and
//! lifecycle modules.

use core::ptr::NonNull;

/// Discriminant value of a container that holds no alternative.
///
/// A container only reaches this state when the destructor of its previous
/// value panicked while it was being replaced. Lists that satisfy
/// [`AlternativeList::NEVER_VALUELESS`] can never observe it.
///
/// [`AlternativeList::NEVER_VALUELESS`]: crate::AlternativeList::NEVER_VALUELESS
pub const VARIANT_NPOS: usize = usize::MAX;

/// Largest alternative count that single-container dispatch handles with a
/// direct `match` on the discriminant. Longer lists go through the generated
/// function table.
pub const DIRECT_DISPATCH_LIMIT: usize = 11;

/// Largest alternative size, in bytes, that still qualifies a list for the
/// never-valueless guarantee.
pub const NEVER_VALUELESS_SIZE_LIMIT: usize = 256;

/// Largest number of alternatives an [`AlternativeList`] can have.
///
/// [`AlternativeList`]: crate::AlternativeList
pub const MAX_ALTERNATIVES: usize = 16;

/// Marker type used when type-erasing storage blocks, visitors and output
/// slots in dispatch tables.
///
/// This zero-sized type serves as a placeholder in pointer types when the
/// actual pointee has been erased. For example, `NonNull<Erased>` in an
/// [`ErasedThunk`] stands for a `NonNull<L::Storage>`, a `NonNull<V>` or a
/// `NonNull<MaybeUninit<R>>` depending on the argument position.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct Erased;

/// Entry of a generated dispatch table.
///
/// The arguments are, in order: the storage block of the container being
/// visited, a pointer to the visitor (which the thunk reads out, taking
/// ownership) and a pointer to an uninitialized output slot (which the thunk
/// writes on success).
#[doc(hidden)]
pub type ErasedThunk = unsafe fn(NonNull<Erased>, NonNull<Erased>, NonNull<Erased>);
