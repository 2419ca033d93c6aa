pub mod db;
pub mod tmdb;
