pub mod config;
pub mod core;
pub mod db;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod providers;
pub mod schema;
