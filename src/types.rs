use core::{cmp, fmt};

use arbitrary_int::{u5, Number};

use super::Error;

/// The number of levels of the tallest tower a [`SkipMap`](crate::SkipMap) can be configured with.
pub(crate) const MAX_HEIGHT: usize = 31;

/// The default maximum height of a [`SkipMap`](crate::SkipMap).
pub(crate) const DEFAULT_HEIGHT: u8 = 21;

/// Height which is used to configure the maximum tower height of a skiplist, it is a 5-bit unsigned integer
/// in range `[1, 31]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height(u5);

impl Height {
  /// The maximum value of the `Height`.
  pub const MAX: Self = Self(u5::MAX);

  /// The minimum value of the `Height`.
  pub const MIN: Self = Self(u5::new(1));

  /// Creates a new `Height` with the default value (`21`).
  #[inline]
  pub const fn new() -> Self {
    Self(u5::new(DEFAULT_HEIGHT))
  }

  /// Creates a new `Height` from the given `u8`.
  ///
  /// # Panics
  /// - If the given value is `0` or greater than `31`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Height;
  ///
  /// let height = Height::from_u8(12);
  /// assert_eq!(height, 12u8);
  /// ```
  #[inline]
  pub const fn from_u8(val: u8) -> Self {
    assert!(
      val >= 1 && val as usize <= MAX_HEIGHT,
      "height must be in range [1, 31]"
    );
    Self(u5::new(val))
  }

  /// Converts the `Height` to a `u8`.
  #[inline]
  pub const fn to_u8(&self) -> u8 {
    self.0.value()
  }

  /// Converts the `Height` to a `usize`.
  #[inline]
  pub const fn to_usize(&self) -> usize {
    self.0.value() as usize
  }
}

impl Default for Height {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for Height {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_u8())
  }
}

impl From<Height> for u8 {
  #[inline]
  fn from(height: Height) -> Self {
    height.to_u8()
  }
}

impl From<Height> for usize {
  #[inline]
  fn from(height: Height) -> Self {
    height.to_usize()
  }
}

macro_rules! impl_height_conversions {
  ($($target:ident),+ $(,)?) => {
    $(
      paste::paste! {
        impl TryFrom<$target> for Height {
          type Error = Error;

          #[inline]
          fn try_from(value: $target) -> Result<Self, Self::Error> {
            Self::[< try_from_ $target >](value)
          }
        }

        impl Height {
          #[doc = "Tries to create a `Height` from the given `" $target "`."]
          ///
          /// Returns [`Error::InvalidHeight`] if the value is `0` or greater than `31`.
          #[inline]
          pub fn [< try_from_ $target >](value: $target) -> Result<Self, Error> {
            let invalid = Error::InvalidHeight { height: value as u64 };
            match u8::try_from(value) {
              Ok(val) if val >= 1 => u5::try_new(val).map(Self).map_err(|_| invalid),
              _ => Err(invalid),
            }
          }
        }

        impl PartialEq<$target> for Height {
          #[inline]
          fn eq(&self, other: &$target) -> bool {
            (self.to_u8() as u64).eq(&(*other as u64))
          }
        }

        impl PartialOrd<$target> for Height {
          #[inline]
          fn partial_cmp(&self, other: &$target) -> Option<cmp::Ordering> {
            (self.to_u8() as u64).partial_cmp(&(*other as u64))
          }
        }
      }
    )*
  };
}

impl_height_conversions!(u8, u16, u32, u64, usize);
