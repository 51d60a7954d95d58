//! Unicode case-insensitive substring search.
//!
//! Folding maps every codepoint to a canonical caseless form, including
//! folds that change length (`ß` to `ss`, `ﬃ` to `ffi`). Searching
//! compares folded runes but reports matches in bytes of the original
//! haystack. Malformed UTF-8 never fails a call: each malformed byte is
//! compared as itself.
//!
//! ```rust
//! use simd_casefind::{find, fold_to_vec, Match};
//!
//! assert_eq!(find("Die Straße".as_bytes(), b"STRASSE"), Some(Match::new(4, 7)));
//! assert_eq!(fold_to_vec("ΜΆΪΟΣ".as_bytes()), "μάϊοσ".as_bytes());
//! ```

pub mod backend;
pub mod engine;
pub mod error;
pub mod find;
pub mod fold;
pub mod io;
pub mod kernel;
pub mod needle;
pub mod segment;
pub mod utf8;

pub use backend::Backend;
pub use error::{Error, Result};
pub use find::{FindIter, Finder, Match, contains, find, find_serial, find_with, find_with_metadata};
pub use fold::{CaseFolder, FoldedRunes, fold, fold_capacity, fold_to_vec, is_case_agnostic, order};
pub use kernel::{Kernel, classify};
pub use needle::NeedleMetadata;
