pub mod cache;
pub mod coordinate;
pub mod estimate;
pub mod source;
pub mod table_api;
pub mod transport_mode;
