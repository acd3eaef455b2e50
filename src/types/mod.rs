pub mod analysis;
pub mod interval;

pub use analysis::*;
pub use interval::*;
