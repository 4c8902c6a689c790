pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::pipeline::{PipelineOrchestrator, PipelineRun, PipelineStage};
pub use generator::workflow::launch;
pub use llm::{GenerationSettings, TextGenerator};
pub use types::subject::{Subject, SubjectForm};
