//! HTTP plumbing shared by MovieApp services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod shutdown;
pub mod tracing;
