//! Equipment Tally Common Library
//!
//! 設備メンテナンス記録の件数集計（CLIと表示層で共有）

pub mod types;
pub mod keywords;
pub mod columns;
pub mod tally;
pub mod diagnostics;
pub mod error;

pub use types::{CellValue, CountingMode, EquipmentTally, MatchRecord, Record, TallyResult};
pub use keywords::{EquipmentKeywordTable, EquipmentKeywords, KeywordOverlap};
pub use columns::{select_search_columns, duplicated_columns};
pub use tally::{tally, tally_with, TallyOptions, DEFAULT_SAMPLE_SIZE};
pub use diagnostics::{diagnose, Diagnosis, EquipmentDiagnosis};
pub use error::{Error, Result};
