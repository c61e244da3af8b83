pub mod logger;

pub use logger::{AnalysisLog, AnalysisLogger};
