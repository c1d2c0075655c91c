#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`tagvariant`].
//!
//! # Overview
//!
//! This crate contains the raw storage, the type-level alternative lists and
//! the unsafe dispatch machinery that power the [`tagvariant`] container. It
//! provides a discriminated union whose lifecycle operations are chosen at
//! compile time from the properties of its alternatives.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`tagvariant`] crate, not this one.
//!
//! # Architecture
//!
//! The crate is layered from the raw storage up:
//!
//! - **[`storage`]**: Uninitialized storage
//!   - [`AlternativeStorage`]: One possibly-uninitialized value
//!   - [`RecursiveUnion`]: `#[repr(C)]` union nesting one cell per alternative
//!
//! - **[`list`]**: Alternative lists, implemented for tuples of 1 to 16 types
//!   - [`AlternativeList`]: Storage type, length and lifecycle flags
//!   - [`Alternative`]: Type and cell projection of one position
//!   - [`Contains`]: Type-keyed lookup, ambiguous for duplicated types
//!
//! - **[`raw`]**: [`RawVariant`], the storage block paired with its
//!   discriminant
//!
//! - **[`visit`]**: Visitation of the active alternative
//!   - [`Dispatch`]/[`RawDispatch`]: Direct branch or generated table
//!   - [`visit_all`]/[`raw_visit_all`]: Several containers at once
//!
//! - **[`smf`]**: Copy and move construction and assignment, each available
//!   only when every alternative supports it
//!
//! - **[`ops`]**: Alternative-wise `Debug`, `PartialEq`, `Eq` and `Hash`
//!
//! # Safety Strategy
//!
//! A container stores its alternatives in overlapping, untyped cells. The
//! discriminant is the only record of which cell holds a live value, so every
//! unsafe operation depends on it being right.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: [`RawVariant`] keeps its storage and
//!   discriminant module-private, making the invariant between the two
//!   locally verifiable within a single file
//! - **`#[repr(C)]` layout**: Every cell sits at offset zero of the storage
//!   block, so cell projection is a pointer cast
//! - **Generated tables**: Dispatch tables are associated constants built from
//!   the same list, access category and visitor as the code that indexes them
//!
//! See the individual module documentation ([`raw`], [`visit::dispatch`]) for
//! detailed explanations of how these patterns are applied.
//!
//! [`tagvariant`]: https://docs.rs/tagvariant/latest/tagvariant/

#[cfg(test)]
extern crate alloc;

pub mod list;
pub mod ops;
pub mod raw;
pub mod smf;
pub mod storage;
pub mod util;
pub mod visit;

pub use self::{
    list::{Alt, Alternative, AlternativeList, Contains, Index},
    ops::{DebugList, EqList, HashList, PartialEqList},
    raw::RawVariant,
    smf::{AssignSource, CopyAssignable, CopyConstructible, MoveAssignable, MoveConstructible},
    storage::{AlternativeStorage, RecursiveUnion},
    util::{DIRECT_DISPATCH_LIMIT, MAX_ALTERNATIVES, NEVER_VALUELESS_SIZE_LIMIT, VARIANT_NPOS},
    visit::{
        Dispatch, Exclusive, Indexed, Owned, Place, PlaceList, RawDispatch, Shared, Unindexed,
        Valueless, Visitor, raw_visit, raw_visit_all, raw_visit_indexed, visit, visit_all,
    },
};
