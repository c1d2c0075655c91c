#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A discriminated union over a tuple of alternatives.
//!
//! ## Overview
//!
//! [`Variant<L>`] holds exactly one value whose type is one of the
//! alternatives listed in the tuple `L`, together with the index of that
//! alternative. It is the type-level counterpart of an `enum`: the set of
//! alternatives is a type parameter rather than a declaration, so generic code
//! can build containers over any list of types.
//!
//! What a container can do follows from what its alternatives can do. A
//! `Variant<(u8, String)>` is `Clone`, `Eq` and `Hash` because both `u8` and
//! `String` are; a `Variant<(u8, f32)>` is `Clone` and `PartialEq` but not
//! `Eq`. Nothing is paid at runtime for capabilities that are unused.
//!
//! ## Quick Example
//!
//! ```
//! use tagvariant::{BadAccess, Variant};
//!
//! let mut variant: Variant<(i32, String)> = Variant::new::<1>(String::from("abc"));
//! assert_eq!(variant.index(), 1);
//!
//! variant.emplace::<0>(5);
//! assert_eq!(variant.get::<0>(), Ok(&5));
//! assert_eq!(
//!     variant.get::<1>(),
//!     Err(BadAccess::Inactive {
//!         requested: 1,
//!         active: 0
//!     })
//! );
//! ```
//!
//! ## Core Concepts
//!
//! **Alternatives** are addressed by their position in `L`, as a const
//! generic: `new::<I>`, `emplace::<I>`, `get::<I>`. When a type occurs exactly
//! once in `L` it can also be addressed by type: `from_value`, `emplace_as`,
//! `get_as`. Using a position past the end, or a type that occurs twice, is a
//! compile error.
//!
//! **Visitors** implement [`Visitor<Args>`] for every argument they accept,
//! and are called with the active alternative:
//!
//! - [`Variant::visit`], [`Variant::visit_mut`] and [`Variant::into_visit`]
//!   pass `&T`, `&mut T` or `T`, and return the output of the visitor, which
//!   must be the same type for every alternative
//! - [`visit()`] does the same for a tuple of up to eight containers, passing
//!   a tuple of arguments
//! - [`Variant::raw_visit_indexed`] and [`visit_raw_indexed`] wrap each
//!   argument in [`Indexed<I, _>`](Indexed) and pass [`Valueless`] for a
//!   valueless container
//!
//! Containers with at most [`DIRECT_DISPATCH_LIMIT`] alternatives are
//! dispatched with a direct `match`; larger ones and multi-container visits go
//! through generated tables of function pointers, one lookup per container.
//!
//! **Valueless containers.** Replacing a value runs its destructor. If that
//! destructor panics, the container is left holding nothing: [`Variant::index`]
//! returns [`VARIANT_NPOS`] and accessors return [`BadAccess::Valueless`]. A
//! list whose alternatives have no drop glue can never get there, and its
//! containers skip every valueless check.
//!
//! For implementation details, see the [`tagvariant-internals`] crate.
//!
//! [`tagvariant-internals`]: tagvariant_internals
//!
//! ## Features
//!
//! - **`tracing`**: Emit a `tracing` warning, on the `tagvariant` target, when
//!   a container becomes valueless because a destructor panicked.

#[cfg(test)]
extern crate alloc;

pub mod markers;
pub mod prelude;

mod error;
mod variant;
mod visitation;

pub use tagvariant_internals::{
    DIRECT_DISPATCH_LIMIT, Indexed, MAX_ALTERNATIVES, NEVER_VALUELESS_SIZE_LIMIT, VARIANT_NPOS,
    Valueless, Visitor,
};

pub use self::{
    error::BadAccess,
    variant::Variant,
    visitation::{Handle, Handles, VisitOutput, visit, visit_raw_indexed},
};
