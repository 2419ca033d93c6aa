//! sea-orm entities for the MovieApp API database.

pub mod embedded;
pub mod reviews;
pub mod users;
