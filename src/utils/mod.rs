pub mod threads;
pub mod urls;
