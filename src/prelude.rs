//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use tagvariant::prelude::*;
//!
//! let mut variant: Variant<(u32, String)> = Variant::new::<0>(1);
//! variant.emplace_as(String::from("two"));
//! assert_eq!(variant.get::<1>().map(String::as_str), Ok("two"));
//! assert!(matches!(variant.get::<0>(), Err(BadAccess::Inactive { .. })));
//! ```
//!
//! # What's Included
//!
//! - **[`Variant`]**: The container
//! - **[`BadAccess`]**: The error of checked access and visitation
//! - **[`Visitor`]**, **[`Indexed`]** and **[`Valueless`]**: For writing
//!   visitors
//! - **[`visit`]**: Visitation of several containers
//! - **[`markers`]**: Capability traits for bounds on alternative lists

pub use crate::{BadAccess, Indexed, Valueless, Variant, Visitor, markers, visit};
