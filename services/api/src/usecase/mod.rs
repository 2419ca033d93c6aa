pub mod account;
pub mod collection;
pub mod credential;
pub mod movie;
pub mod published_review;
