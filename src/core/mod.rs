pub mod api;
pub mod config;
pub mod enrich;
pub mod error;
pub mod paginate;
pub mod present;
pub mod shape;
pub mod terminal;
