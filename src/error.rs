//! The error returned by checked accessors and visitation.

/// Access to an alternative that the container does not hold.
///
/// Returned by the checked accessors of [`Variant`](crate::Variant) and by
/// [`visit`](crate::visit()) when a requested alternative is not active, or
/// when the container holds no alternative at all.
///
/// # Examples
///
/// ```
/// use tagvariant::{BadAccess, Variant};
///
/// let variant: Variant<(i32, String)> = Variant::new::<0>(5);
/// assert_eq!(
///     variant.get::<1>(),
///     Err(BadAccess::Inactive {
///         requested: 1,
///         active: 0
///     })
/// );
/// assert_eq!(
///     variant.get::<1>().unwrap_err().to_string(),
///     "alternative 1 was requested, but alternative 0 is active"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BadAccess {
    /// The container is valueless.
    #[error("the container is valueless")]
    Valueless,
    /// Another alternative is active.
    #[error("alternative {requested} was requested, but alternative {active} is active")]
    Inactive {
        /// The index of the requested alternative.
        requested: usize,
        /// The index of the active alternative.
        active: usize,
    },
}

impl BadAccess {
    /// Describes a failed request for alternative `requested` on a container
    /// whose discriminant is `active`.
    #[inline]
    pub(crate) fn new(requested: usize, active: usize, valid: bool) -> Self {
        if valid {
            BadAccess::Inactive { requested, active }
        } else {
            BadAccess::Valueless
        }
    }
}
