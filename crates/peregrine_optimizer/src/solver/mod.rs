pub mod exact;
pub mod params;
pub mod progressive;
pub mod recompute;
pub mod resolver;
pub mod route;
