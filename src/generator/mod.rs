pub mod context;
pub mod enrichment;
pub mod outlet;
pub mod pipeline;
pub mod prompts;
pub mod workflow;
