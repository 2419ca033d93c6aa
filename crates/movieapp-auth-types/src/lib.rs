//! Auth types shared across MovieApp crates.
//!
//! Provides bearer-token issuing/validation and the `Identity` extractor that
//! gates every protected route.

pub mod identity;
pub mod token;
