pub mod analysis;
pub mod document;
pub mod quiz;

pub use analysis::AnalysisResult;
pub use document::DocumentText;
pub use quiz::{Quiz, QuizQuestion, OPTION_COUNT, QUESTION_COUNT};
