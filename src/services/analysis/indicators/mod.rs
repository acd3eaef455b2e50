//! Per-interval indicator series.

pub mod heikin_ashi;
pub mod momentum;
pub mod moving_average;
pub mod volume;
pub mod vwap;

pub use heikin_ashi::heikin_ashi;
pub use momentum::momentum;
pub use moving_average::{moving_average, MovingAverage};
pub use volume::volume_weights;
pub use vwap::{vwap, Vwap};
