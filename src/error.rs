use core::fmt;

/// Error type for the `skipmap` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  /// Indicates that a value cannot be used as the maximum height of a skiplist,
  /// a valid height is in range `[1, 31]`.
  InvalidHeight {
    /// The rejected height.
    height: u64,
  },
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidHeight { height } => {
        write!(f, "invalid height {height}, must be in range [1, 31]")
      }
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
