pub mod scheduler;
pub mod surface;
