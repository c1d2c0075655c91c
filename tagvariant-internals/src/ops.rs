//! Alternative-wise formatting, comparison and hashing.
//!
//! Each trait is implemented for a list when every alternative implements
//! the corresponding standard trait, and operates on the active alternative
//! of a [`RawVariant`]. Two containers are equal when they hold the same
//! alternative with equal values, or are both valueless.

use core::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    list::{Alternative, AlternativeList, for_each_arity},
    raw::RawVariant,
    visit::{Indexed, Valueless, Visitor, raw_visit_indexed, visit},
};

/// Lists whose alternatives all implement [`fmt::Debug`].
pub trait DebugList: AlternativeList {
    /// Formats the active alternative, or `<valueless>`.
    fn fmt_active(raw: &RawVariant<Self>, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Lists whose alternatives all implement [`PartialEq`].
pub trait PartialEqList: AlternativeList {
    /// Compares the active alternatives of two containers.
    fn eq_active(lhs: &RawVariant<Self>, rhs: &RawVariant<Self>) -> bool;
}

/// Lists whose alternatives all implement [`Eq`].
pub trait EqList: PartialEqList {}

/// Lists whose alternatives all implement [`Hash`].
pub trait HashList: AlternativeList {
    /// Feeds the discriminant and the active alternative into `state`.
    fn hash_active<H: Hasher>(raw: &RawVariant<Self>, state: &mut H);
}

/// Visitor formatting a value with its [`fmt::Debug`] implementation.
struct DebugValue<'f, 'g> {
    /// The formatter to write to
    formatter: &'f mut fmt::Formatter<'g>,
}

impl<'a, T: fmt::Debug> Visitor<&'a T> for DebugValue<'_, '_> {
    type Output = fmt::Result;

    #[inline]
    fn visit(self, value: &'a T) -> fmt::Result {
        fmt::Debug::fmt(value, self.formatter)
    }
}

/// Raw-indexed visitor comparing a value with the same alternative of
/// `other`.
struct EqValue<'o, 'r, L: AlternativeList> {
    /// The container to compare with
    other: &'o RawVariant<L>,
    /// Receives the result
    equal: &'r mut bool,
}

impl<'a, L, T, const I: usize> Visitor<Indexed<I, &'a T>> for EqValue<'_, '_, L>
where
    L: Alternative<I, Type = T>,
    T: PartialEq,
{
    type Output = ();

    #[inline]
    fn visit(self, value: Indexed<I, &'a T>) {
        *self.equal = self.other.get::<I>() == Some(value.0);
    }
}

impl<L: AlternativeList> Visitor<Valueless> for EqValue<'_, '_, L> {
    type Output = ();

    #[inline]
    fn visit(self, _value: Valueless) {
        *self.equal = !self.other.is_valid();
    }
}

/// Visitor feeding a value into a hasher.
struct HashValue<'h, H> {
    /// The hasher to feed
    state: &'h mut H,
}

impl<'a, T: Hash, H: Hasher> Visitor<&'a T> for HashValue<'_, H> {
    type Output = ();

    #[inline]
    fn visit(self, value: &'a T) {
        value.hash(self.state);
    }
}

/// Implements the formatting, equality and hashing lists for one tuple arity.
macro_rules! impl_ops {
    ($($A:ident $idx:tt),+) => {
        impl<$($A: fmt::Debug),+> DebugList for ($($A,)+) {
            fn fmt_active(
                raw: &RawVariant<Self>,
                formatter: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                match visit(raw, DebugValue { formatter: &mut *formatter }) {
                    Some(result) => result,
                    None => formatter.write_str("<valueless>"),
                }
            }
        }

        impl<$($A: PartialEq),+> PartialEqList for ($($A,)+) {
            fn eq_active(lhs: &RawVariant<Self>, rhs: &RawVariant<Self>) -> bool {
                if lhs.index() != rhs.index() {
                    return false;
                }
                let mut equal = false;
                raw_visit_indexed(lhs, EqValue { other: rhs, equal: &mut equal });
                equal
            }
        }

        impl<$($A: Eq),+> EqList for ($($A,)+) {}

        impl<$($A: Hash),+> HashList for ($($A,)+) {
            fn hash_active<H: Hasher>(raw: &RawVariant<Self>, state: &mut H) {
                raw.index().hash(state);
                let _ = visit(raw, HashValue { state });
            }
        }
    };
}

for_each_arity!(impl_ops);
