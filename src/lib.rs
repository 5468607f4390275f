pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod explainer;
pub mod export;
pub mod importer;
pub mod report;
pub mod storage;

pub use equipment_tally_common as common;
