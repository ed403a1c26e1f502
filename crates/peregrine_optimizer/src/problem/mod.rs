pub mod duration_matrix;
pub mod location;
pub mod location_index;
