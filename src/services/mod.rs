pub mod generation_service;
pub mod llm_service;
pub mod pdf_extractor;

pub use generation_service::GenerationService;
pub use llm_service::LlmService;
pub use pdf_extractor::{ExtractError, PdfExtractor};
