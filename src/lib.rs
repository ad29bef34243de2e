#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", test)))]
extern crate alloc as std;

#[cfg(any(feature = "std", test))]
extern crate std;

mod arena;
mod node;

mod error;
pub use error::Error;

mod types;
pub use types::Height;

mod options;
pub use options::{Options, DEFAULT_PROBABILITY};

/// An ordered map implementation based on skiplist.
pub mod map;
pub use map::{Entry, EntryRef, SkipMap};

/// A skipmap guarded by a reader-writer lock.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod sync;

/// The default maximum height of the towers in a [`SkipMap`].
pub const DEFAULT_MAX_HEIGHT: Height = Height::new();
