//! Negation-tiered property grants and their cascade resolution.
//!
//! Every rule application deposits a grant `(tier, +1)` against a token:
//! tier 0 for "X IS PUSH", tier 1 for "X IS NOT PUSH", tier 2 for
//! "X IS NOT NOT PUSH", and so on. Whether a property is effectively
//! enabled is decided by the cascade in [`store::cascade`], which lets
//! grants at adjacent tiers annihilate pairwise before the survivor's
//! tier is compared against the queried one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod store;

pub use store::{OperatorChannels, PropertyStore};
