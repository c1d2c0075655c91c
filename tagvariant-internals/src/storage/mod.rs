//! Raw storage for the alternatives of a container.
//!
//! - [`slot`]: [`AlternativeStorage`], one possibly-uninitialized value
//! - [`union`]: [`RecursiveUnion`], the overlapping cells of a whole list

pub mod slot;
pub mod union;

pub use self::{
    slot::AlternativeStorage,
    union::{End, Here, RecursiveUnion, There, UnionAt},
};
