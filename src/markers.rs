//! Capability traits and access categories.
//!
//! The traits in this module are implemented for alternative lists, the tuple
//! types `L` of [`Variant<L>`](crate::Variant). They are never implemented by
//! hand; the crate implements them for every tuple of 1 to 16 types whose
//! elements qualify. They show up in bounds, for example to write functions
//! that are generic over the list:
//!
//! ```
//! use tagvariant::{Variant, markers::CopyConstructible};
//! # use tagvariant::markers::CopyAssignable;
//!
//! fn duplicate<L: CopyConstructible + CopyAssignable>(variant: &Variant<L>) -> [Variant<L>; 2] {
//!     [variant.clone(), variant.clone()]
//! }
//!
//! let [a, b] = duplicate(&Variant::<(u8, String)>::new::<0>(1));
//! assert_eq!(a, b);
//! ```
//!
//! # Lifecycle capabilities
//!
//! | capability       | trait                 | requirement on every alternative |
//! |------------------|-----------------------|----------------------------------|
//! | copy-construct   | [`CopyConstructible`] | `Clone`                          |
//! | copy-assign      | [`CopyAssignable`]    | `Clone`                          |
//! | move-construct   | [`MoveConstructible`] | none                             |
//! | move-assign      | [`MoveAssignable`]    | none                             |
//!
//! A list whose alternatives have no drop glue and fit in
//! [`NEVER_VALUELESS_SIZE_LIMIT`](crate::NEVER_VALUELESS_SIZE_LIMIT) bytes
//! each is *never-valueless*: its containers can not become valueless, and
//! the valueless checks are compiled out.
//!
//! # Access categories
//!
//! The category decides what a visitor receives for an alternative `T`:
//!
//! - [`Shared<'a>`]: `&'a T`, from [`Variant::visit`](crate::Variant::visit)
//! - [`Exclusive<'a>`]: `&'a mut T`, from
//!   [`Variant::visit_mut`](crate::Variant::visit_mut)
//! - [`Owned`]: `T`, from [`Variant::into_visit`](crate::Variant::into_visit)
//!
//! # Visit modes
//!
//! Bounds of generic code forwarding to the visiting functions name the
//! dispatch machinery directly:
//!
//! - [`Unindexed<V>`] adapts a visitor of bare values to the raw-indexed
//!   dispatch of [`Variant::raw_visit`](crate::Variant::raw_visit)
//! - [`Deduced`] and [`RawIndexed`] are the [`Mode`]s of
//!   [`visit`](crate::visit) and [`visit_raw_indexed`](crate::visit_raw_indexed),
//!   driving a [`Curry`] that collects one argument per container
//!
//! ```
//! use tagvariant::{
//!     Handles, Variant, Visitor, visit_raw_indexed,
//!     markers::{Curry, Mode, RawIndexed},
//! };
//!
//! fn forward<H, V>(handles: H, visitor: V)
//! where
//!     H: Handles,
//!     RawIndexed: Mode<H::Head, Curry<RawIndexed, V, (), H::Tail>>,
//! {
//!     visit_raw_indexed(handles, visitor);
//! }
//!
//! struct Nothing;
//!
//! impl<T> Visitor<T> for Nothing {
//!     type Output = ();
//!
//!     fn visit(self, _args: T) {}
//! }
//!
//! let variant: Variant<(u8, char)> = Variant::new::<1>('x');
//! forward((&variant,), Nothing);
//! ```

pub use tagvariant_internals::{
    Alternative, AlternativeList, Contains, CopyAssignable, CopyConstructible, DebugList, Dispatch,
    EqList, Exclusive, HashList, Index, MoveAssignable, MoveConstructible, Owned, PartialEqList,
    RawDispatch, Shared, Unindexed,
    visit::{Curry, Deduced, Mode, RawIndexed},
};
