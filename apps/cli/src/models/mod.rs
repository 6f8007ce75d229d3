pub mod analysis;

pub use analysis::{AdjustedDocument, AnalysisResult, ApiResponse, Suggestions};
