//! URL handling module for Pagechain
//!
//! This module provides origin derivation (the same-origin rule that keeps a
//! crawl on the seed's site) and the canonical form used for deduplication.

mod normalize;
mod origin;

pub use normalize::{canonicalize, parse_canonical};
pub use origin::Origin;
