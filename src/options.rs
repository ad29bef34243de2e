use super::Height;

/// The default probability numerator of promoting an entry to the next level,
/// out of the 16-bit range: `0x3FFF / 0xFFFF ≈ 0.25`.
pub const DEFAULT_PROBABILITY: u16 = 0x3FFF;

/// Options for [`SkipMap`](crate::SkipMap).
#[viewit::viewit(vis_all = "pub(crate)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
  max_height: Height,
  probability: u16,
  seed: Option<u64>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_height: Height::new(),
      probability: DEFAULT_PROBABILITY,
      seed: None,
    }
  }

  /// Sets the maximum height of the towers in the skiplist.
  ///
  /// A higher value costs more memory for the head of the skiplist and bounds the
  /// worst case of a lookup on very large maps.
  ///
  /// The height is at most `31` ([`Height::MAX`]), [`Height::from_u8`] panics on a
  /// larger value and [`Height::try_from`] returns an error instead.
  ///
  /// Default is `21`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::{Options, Height};
  ///
  /// let opts = Options::new().with_max_height(Height::from_u8(12));
  /// assert_eq!(opts.max_height(), 12u8);
  ///
  /// let opts = Options::new().with_max_height(Height::MAX);
  /// assert_eq!(opts.max_height(), 31u8);
  /// assert!(Height::try_from(32u8).is_err());
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, height: Height) -> Self {
    self.max_height = height;
    self
  }

  /// Sets the probability numerator (out of `u16::MAX`) of promoting a new entry to the next level.
  ///
  /// A lower value produces fewer tall towers, which means less memory per entry.
  ///
  /// Default is `0x3FFF` (≈ 0.25).
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Options;
  ///
  /// let opts = Options::new().with_probability(0x7FFF);
  /// assert_eq!(opts.probability(), 0x7FFF);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, probability: u16) -> Self {
    self.probability = probability;
    self
  }

  /// Seeds the random generator which assigns heights to new entries, so that
  /// the shape of the skiplist is reproducible.
  ///
  /// By default, the generator is seeded from the operating system.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Options;
  ///
  /// let opts = Options::new().with_seed(42);
  /// assert_eq!(opts.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Returns the maximum height of the towers.
  #[inline]
  pub const fn max_height(&self) -> Height {
    self.max_height
  }

  /// Returns the probability numerator of promoting an entry to the next level.
  #[inline]
  pub const fn probability(&self) -> u16 {
    self.probability
  }

  /// Returns the seed of the height generator, if any.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }
}
