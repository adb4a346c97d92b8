pub mod progress;
pub mod select;
