pub mod analysis;
pub mod store;

pub use analysis::{analyze, AnalysisOptions};
pub use store::AnalysisStore;
