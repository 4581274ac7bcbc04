pub mod day;
pub mod interval;

pub use day::*;
pub use interval::*;
