pub mod auth;
pub mod collection;
pub mod extract;
pub mod health;
pub mod movie;
pub mod profile;
pub mod review;
