pub mod archive;
pub mod config;
pub mod dedup;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod sort;
