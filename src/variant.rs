//! The public container.
//!
//! [`Variant<L>`] wraps a [`RawVariant<L>`] and turns its `Option`-returning
//! accessors into checked ones reporting [`BadAccess`]. It adds no invariant
//! of its own; every lifecycle operation is delegated to the capability traits
//! of the alternative list.

use core::{
    fmt,
    hash::{Hash, Hasher},
};

use tagvariant_internals::{
    Alt, Alternative, AlternativeList, Contains, CopyAssignable, CopyConstructible, DebugList,
    Dispatch, EqList, Exclusive, HashList, MoveAssignable, Owned, PartialEqList, RawDispatch,
    RawVariant, Shared, Unindexed,
};

use crate::error::BadAccess;

/// A discriminated union holding one value from the alternatives of `L`.
///
/// `L` is a tuple of 1 to 16 types. The container holds exactly one value of
/// one of those types at a time, identified by its position in the tuple.
/// Alternatives can be addressed by position (`get::<1>()`) or, when the type
/// occurs exactly once, by type (`get_as::<String, _>()`).
///
/// Copying, assignment and comparison are available exactly when every
/// alternative supports them: [`Clone`] requires every alternative to be
/// `Clone`, [`PartialEq`] requires every alternative to be `PartialEq`, and so
/// on.
///
/// # Valueless containers
///
/// If the destructor of the active value panics while [`emplace`] or an
/// assignment replaces it, the container is left valueless: [`index`] returns
/// [`VARIANT_NPOS`](crate::VARIANT_NPOS) and every accessor reports
/// [`BadAccess::Valueless`] until a new value is emplaced. Lists whose
/// alternatives have no drop glue can never become valueless.
///
/// [`emplace`]: Variant::emplace
/// [`index`]: Variant::index
///
/// # Examples
///
/// ```
/// use tagvariant::Variant;
///
/// let mut variant: Variant<(i32, String)> = Variant::from_value(String::from("abc"));
/// assert_eq!(variant.index(), 1);
/// assert_eq!(variant.get::<1>().map(String::as_str), Ok("abc"));
///
/// *variant.emplace::<0>(5) += 1;
/// assert_eq!(variant.get_as::<i32, _>(), Ok(&6));
/// assert!(variant.get::<1>().is_err());
/// ```
///
/// Looking up a type that occurs more than once does not compile:
///
/// ```compile_fail
/// use tagvariant::Variant;
///
/// let variant: Variant<(i32, i32)> = Variant::new::<0>(1);
/// let _ = variant.get_as::<i32, _>();
/// ```
///
/// Neither does an index past the last alternative:
///
/// ```compile_fail
/// use tagvariant::Variant;
///
/// let variant: Variant<(i32, f64)> = Variant::new::<2>(1);
/// ```
///
/// Or a container without alternatives:
///
/// ```compile_fail
/// use tagvariant::Variant;
///
/// let variant: Variant<()> = Variant::default();
/// ```
#[repr(transparent)]
pub struct Variant<L: AlternativeList> {
    /// The storage and discriminant
    raw: RawVariant<L>,
}

impl<L: AlternativeList> Variant<L> {
    /// The number of alternatives.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// assert_eq!(Variant::<(u8, u16, u32)>::SIZE, 3);
    /// ```
    pub const SIZE: usize = L::LEN;

    /// Creates a container holding `value` as alternative `I`.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let variant: Variant<(u8, u8)> = Variant::new::<1>(3);
    /// assert_eq!(variant.index(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn new<const I: usize>(value: Alt<L, I>) -> Self
    where
        L: Alternative<I>,
    {
        Self {
            raw: RawVariant::new::<I>(value),
        }
    }

    /// Creates a container holding `value` as the alternative of type `T`.
    ///
    /// `T` must occur exactly once in `L`.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let variant: Variant<(u8, &str)> = Variant::from_value("abc");
    /// assert_eq!(variant.index(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_value<T, Idx>(value: T) -> Self
    where
        L: Contains<T, Idx>,
    {
        Self {
            raw: RawVariant::new_as::<T, Idx>(value),
        }
    }

    /// Returns the index of the active alternative, or
    /// [`VARIANT_NPOS`](crate::VARIANT_NPOS) if the container is valueless.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.raw.index()
    }

    /// Returns whether the container holds no alternative.
    ///
    /// Always `false` for lists whose alternatives have no drop glue.
    #[inline]
    #[must_use]
    pub fn is_valueless(&self) -> bool {
        !self.raw.is_valid()
    }

    /// Returns whether the alternative of type `T` is active.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let variant: Variant<(u8, char)> = Variant::new::<1>('x');
    /// assert!(variant.holds::<char, _>());
    /// assert!(!variant.holds::<u8, _>());
    /// ```
    #[inline]
    #[must_use]
    pub fn holds<T, Idx>(&self) -> bool
    where
        L: Contains<T, Idx>,
    {
        self.raw.index() == <L as Contains<T, Idx>>::INDEX
    }

    /// Replaces the active value with `value` as alternative `I` and returns
    /// a reference to it.
    ///
    /// The old value is destroyed first. If its destructor panics, the
    /// container is left valueless and the panic continues.
    #[inline]
    pub fn emplace<const I: usize>(&mut self, value: Alt<L, I>) -> &mut Alt<L, I>
    where
        L: Alternative<I>,
    {
        self.raw.emplace::<I>(value)
    }

    /// Replaces the active value with `value` as the alternative of type `T`.
    #[inline]
    pub fn emplace_as<T, Idx>(&mut self, value: T) -> &mut T
    where
        L: Contains<T, Idx>,
    {
        self.raw.emplace_as::<T, Idx>(value)
    }

    /// Replaces the active value with the result of `f` as alternative `I`.
    ///
    /// `f` runs before the old value is touched. If it fails, the container
    /// is left unchanged and the error is returned.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let mut variant: Variant<(String, u32)> = Variant::new::<0>(String::from("keep"));
    /// let result = variant.try_emplace_with::<1, _>(|| "x".parse::<u32>());
    /// assert!(result.is_err());
    /// assert_eq!(variant.get::<0>().map(String::as_str), Ok("keep"));
    ///
    /// assert_eq!(variant.try_emplace_with::<1, _>(|| "7".parse::<u32>()), Ok(&mut 7));
    /// ```
    #[inline]
    pub fn try_emplace_with<const I: usize, E>(
        &mut self,
        f: impl FnOnce() -> Result<Alt<L, I>, E>,
    ) -> Result<&mut Alt<L, I>, E>
    where
        L: Alternative<I>,
    {
        let value = f()?;
        Ok(self.raw.emplace::<I>(value))
    }

    /// Builds the error for a failed request of alternative `requested`.
    #[cold]
    fn bad_access(&self, requested: usize) -> BadAccess {
        BadAccess::new(requested, self.raw.index(), self.raw.is_valid())
    }

    /// Returns alternative `I`.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess`] if another alternative is active or the container
    /// is valueless.
    #[inline]
    pub fn get<const I: usize>(&self) -> Result<&Alt<L, I>, BadAccess>
    where
        L: Alternative<I>,
    {
        self.raw.get::<I>().ok_or_else(|| self.bad_access(I))
    }

    /// Returns alternative `I` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess`] if another alternative is active or the container
    /// is valueless.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> Result<&mut Alt<L, I>, BadAccess>
    where
        L: Alternative<I>,
    {
        let (index, valid) = (self.raw.index(), self.raw.is_valid());
        self.raw
            .get_mut::<I>()
            .ok_or_else(|| BadAccess::new(I, index, valid))
    }

    /// Moves alternative `I` out of the container.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess`] if another alternative is active or the container
    /// is valueless. The container and its value are dropped in that case.
    #[inline]
    pub fn into_inner<const I: usize>(self) -> Result<Alt<L, I>, BadAccess>
    where
        L: Alternative<I>,
    {
        self.raw
            .into_inner::<I>()
            .map_err(|raw| BadAccess::new(I, raw.index(), raw.is_valid()))
    }

    /// Returns the alternative of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess`] if another alternative is active or the container
    /// is valueless.
    #[inline]
    pub fn get_as<T, Idx>(&self) -> Result<&T, BadAccess>
    where
        L: Contains<T, Idx>,
    {
        self.raw
            .get_as::<T, Idx>()
            .ok_or_else(|| self.bad_access(<L as Contains<T, Idx>>::INDEX))
    }

    /// Returns the alternative of type `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess`] if another alternative is active or the container
    /// is valueless.
    #[inline]
    pub fn get_as_mut<T, Idx>(&mut self) -> Result<&mut T, BadAccess>
    where
        L: Contains<T, Idx>,
    {
        let (index, valid) = (self.raw.index(), self.raw.is_valid());
        self.raw
            .get_as_mut::<T, Idx>()
            .ok_or_else(|| BadAccess::new(<L as Contains<T, Idx>>::INDEX, index, valid))
    }

    /// Calls `visitor` with a reference to the active alternative.
    ///
    /// The visitor must accept a `&T` for every alternative `T` and return
    /// the same type for all of them.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess::Valueless`] without calling the visitor if the
    /// container is valueless.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagvariant::{Variant, Visitor};
    ///
    /// struct AsF64;
    ///
    /// impl Visitor<&i32> for AsF64 {
    ///     type Output = f64;
    ///
    ///     fn visit(self, value: &i32) -> f64 {
    ///         f64::from(*value)
    ///     }
    /// }
    ///
    /// impl Visitor<&f64> for AsF64 {
    ///     type Output = f64;
    ///
    ///     fn visit(self, value: &f64) -> f64 {
    ///         *value
    ///     }
    /// }
    ///
    /// impl Visitor<&String> for AsF64 {
    ///     type Output = f64;
    ///
    ///     fn visit(self, value: &String) -> f64 {
    ///         value.parse().unwrap_or(f64::NAN)
    ///     }
    /// }
    ///
    /// let variant: Variant<(i32, f64, String)> = Variant::new::<2>(String::from("2.5"));
    /// assert_eq!(variant.visit(AsF64), Ok(2.5));
    /// ```
    ///
    /// Every alternative must produce the same output type:
    ///
    /// ```compile_fail
    /// use tagvariant::{Variant, Visitor};
    ///
    /// struct Mixed;
    ///
    /// impl Visitor<&i32> for Mixed {
    ///     type Output = i32;
    ///     fn visit(self, value: &i32) -> i32 {
    ///         *value
    ///     }
    /// }
    ///
    /// impl Visitor<&u8> for Mixed {
    ///     type Output = u8;
    ///     fn visit(self, value: &u8) -> u8 {
    ///         *value
    ///     }
    /// }
    ///
    /// let variant: Variant<(i32, u8)> = Variant::new::<0>(1);
    /// let _ = variant.visit(Mixed);
    /// ```
    #[inline]
    pub fn visit<'a, V>(
        &'a self,
        visitor: V,
    ) -> Result<<L as Dispatch<Shared<'a>, V>>::Output, BadAccess>
    where
        L: Dispatch<Shared<'a>, V>,
    {
        tagvariant_internals::visit(&self.raw, visitor).ok_or(BadAccess::Valueless)
    }

    /// Calls `visitor` with a mutable reference to the active alternative.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess::Valueless`] without calling the visitor if the
    /// container is valueless.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let mut variant: Variant<(u32, u32)> = Variant::new::<1>(4);
    /// variant.visit_mut(|value: &mut u32| *value *= 2).unwrap();
    /// assert_eq!(variant.get::<1>(), Ok(&8));
    /// ```
    #[inline]
    pub fn visit_mut<'a, V>(
        &'a mut self,
        visitor: V,
    ) -> Result<<L as Dispatch<Exclusive<'a>, V>>::Output, BadAccess>
    where
        L: Dispatch<Exclusive<'a>, V>,
    {
        tagvariant_internals::visit(&mut self.raw, visitor).ok_or(BadAccess::Valueless)
    }

    /// Consumes the container and calls `visitor` with the active
    /// alternative by value.
    ///
    /// # Errors
    ///
    /// Returns [`BadAccess::Valueless`] without calling the visitor if the
    /// container is valueless.
    #[inline]
    pub fn into_visit<V>(
        self,
        visitor: V,
    ) -> Result<<L as Dispatch<Owned, V>>::Output, BadAccess>
    where
        L: Dispatch<Owned, V>,
    {
        tagvariant_internals::visit(self.raw, visitor).ok_or(BadAccess::Valueless)
    }

    /// Calls `visitor` with a reference to the active alternative, or with
    /// [`Valueless`](crate::Valueless), discarding its output.
    #[inline]
    pub fn raw_visit<'a, V>(&'a self, visitor: V)
    where
        L: RawDispatch<Shared<'a>, Unindexed<V>>,
    {
        tagvariant_internals::raw_visit(&self.raw, visitor);
    }

    /// Calls `visitor` with the active alternative wrapped in
    /// [`Indexed<I, &T>`](crate::Indexed), or with
    /// [`Valueless`](crate::Valueless), discarding its output.
    ///
    /// ```
    /// use tagvariant::{Indexed, Valueless, Variant, Visitor};
    ///
    /// struct Position<'p>(&'p mut usize);
    ///
    /// impl<const I: usize, T> Visitor<Indexed<I, T>> for Position<'_> {
    ///     type Output = ();
    ///
    ///     fn visit(self, _value: Indexed<I, T>) {
    ///         *self.0 = I;
    ///     }
    /// }
    ///
    /// impl Visitor<Valueless> for Position<'_> {
    ///     type Output = ();
    ///
    ///     fn visit(self, _value: Valueless) {}
    /// }
    ///
    /// let variant: Variant<(u8, u8, u8)> = Variant::new::<2>(0);
    /// let mut position = 0;
    /// variant.raw_visit_indexed(Position(&mut position));
    /// assert_eq!(position, 2);
    /// ```
    #[inline]
    pub fn raw_visit_indexed<'a, V>(&'a self, visitor: V)
    where
        L: RawDispatch<Shared<'a>, V>,
    {
        tagvariant_internals::raw_visit_indexed(&self.raw, visitor);
    }

    /// Moves `source` into `self`.
    ///
    /// If both hold the same alternative, the value is assigned in place.
    /// Otherwise the old value is destroyed and the new one moved in. Lists
    /// without drop glue are overwritten bitwise.
    ///
    /// ```
    /// # use tagvariant::Variant;
    /// let mut variant: Variant<(String, u8)> = Variant::new::<1>(1);
    /// variant.assign(Variant::new::<0>(String::from("moved")));
    /// assert_eq!(variant.get::<0>().map(String::as_str), Ok("moved"));
    /// ```
    #[inline]
    pub fn assign(&mut self, source: Self)
    where
        L: MoveAssignable,
    {
        L::move_assign(&mut self.raw, source.raw);
    }

    /// Returns the underlying raw container.
    #[inline]
    pub(crate) fn as_raw(&self) -> &RawVariant<L> {
        &self.raw
    }

    /// Returns the underlying raw container mutably.
    #[inline]
    pub(crate) fn as_raw_mut(&mut self) -> &mut RawVariant<L> {
        &mut self.raw
    }

    /// Unwraps the underlying raw container.
    #[inline]
    pub(crate) fn into_raw(self) -> RawVariant<L> {
        self.raw
    }
}

impl<L> Default for Variant<L>
where
    L: Alternative<0>,
    Alt<L, 0>: Default,
{
    /// Creates a container holding the default value of the first
    /// alternative.
    #[inline]
    fn default() -> Self {
        Self::new::<0>(Default::default())
    }
}

impl<L> Clone for Variant<L>
where
    L: CopyConstructible + CopyAssignable,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            raw: L::copy_construct(&self.raw),
        }
    }

    /// Assigns a copy of `source`.
    ///
    /// If both hold the same alternative, the value is updated with its own
    /// [`Clone::clone_from`]. Otherwise the new value is cloned before the
    /// old one is destroyed, so a panicking `clone` leaves `self` unchanged.
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        L::copy_assign(&mut self.raw, &source.raw);
    }
}

impl<L: DebugList> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Formats the active alternative of a container.
        struct Active<'a, L: AlternativeList>(&'a RawVariant<L>);

        impl<L: DebugList> fmt::Debug for Active<'_, L> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                L::fmt_active(self.0, f)
            }
        }

        f.debug_struct("Variant")
            .field("index", &self.raw.index())
            .field("value", &Active(&self.raw))
            .finish()
    }
}

impl<L: PartialEqList> PartialEq for Variant<L> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        L::eq_active(&self.raw, &other.raw)
    }
}

impl<L: EqList> Eq for Variant<L> {}

impl<L: HashList> Hash for Variant<L> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        L::hash_active(&self.raw, state);
    }
}
