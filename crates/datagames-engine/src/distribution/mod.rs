//! Distribution families, memoised sampling and the catalog that ties them
//! together.
//!
//! - [`Family`] - The closed set of guessable distribution families
//! - [`SampleCache`] - Memoises sample sets by `(family, count)`
//! - [`DistributionCatalog`] - Seeded, memoised sampling and density lookup by key

pub use self::{catalog::*, family::*, sample_cache::*};

mod catalog;
mod family;
mod sample_cache;
