//! Domain types shared across the MovieApp crates.
//!
//! Pure types and rules with no framework dependencies. Safe to import from
//! `usecase/` and `domain/` layers as well as handlers.

pub mod collection;
pub mod pagination;
pub mod rating;
pub mod user;
