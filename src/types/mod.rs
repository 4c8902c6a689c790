pub mod artifact;
pub mod enrichment;
pub mod subject;
