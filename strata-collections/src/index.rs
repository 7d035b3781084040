//! Arena indices with a reserved "no link" value.
//!
//! Node links (`next`, `down`) are stored as plain integers rather than
//! `Option<Idx>`. The maximum value of the integer type is reserved as
//! [`Index::NONE`] and never handed out by a storage.

/// A copyable arena index with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use strata_collections::Index;
///
/// let link: u32 = 7;
/// assert!(link.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), link);
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel value meaning "no node".
    const NONE: Self;

    /// Converts a slot position into an index.
    fn from_usize(val: usize) -> Self;

    /// Returns the slot position this index addresses.
    fn as_usize(self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this addresses a slot.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Largest number of slots addressable without colliding with `NONE`.
    #[inline]
    fn max_slots() -> usize {
        Self::NONE.as_usize()
    }
}

macro_rules! impl_index {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < <$ty>::MAX as usize, "index {} out of range", val);
                    val as Self
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_index!(u16, u32, u64, usize);
