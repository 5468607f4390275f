//! 件数差異の診断
//!
//! 手作業で数えた件数（実レコード数）とチャートの件数（一致件数）が
//! 食い違う理由を、キーワード別・列別の内訳として示す。

use crate::columns::duplicated_columns;
use crate::keywords::KeywordOverlap;
use crate::types::{EquipmentTally, TallyResult};
use serde::{Deserialize, Serialize};

/// 件数の内訳（キーワード別・列別）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub name: String,
    pub count: usize,
}

/// 設備種別ごとの診断
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDiagnosis {
    pub equipment_type: String,
    /// チャートに出る件数
    pub total_matches: usize,
    /// 一致したレコードの実数
    pub distinct_records: usize,
    pub by_keyword: Vec<Breakdown>,
    pub by_column: Vec<Breakdown>,
}

impl EquipmentDiagnosis {
    /// 実レコード数を超えて数えられた件数
    pub fn inflation(&self) -> usize {
        self.total_matches.saturating_sub(self.distinct_records)
    }
}

/// 集計全体の診断
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub equipment: Vec<EquipmentDiagnosis>,
    pub overlapping_keywords: Vec<KeywordOverlap>,
    pub duplicated_columns: Vec<String>,
}

impl Diagnosis {
    pub fn for_type(&self, equipment_type: &str) -> Option<&EquipmentDiagnosis> {
        self.equipment.iter().find(|e| e.equipment_type == equipment_type)
    }
}

/// 集計結果を診断する
pub fn diagnose(result: &TallyResult) -> Diagnosis {
    let equipment = result
        .equipment
        .iter()
        .map(|tally| diagnose_equipment(tally, result))
        .collect();

    Diagnosis {
        equipment,
        overlapping_keywords: result.keyword_table.overlapping_keywords(),
        duplicated_columns: duplicated_columns(&result.search_columns),
    }
}

fn diagnose_equipment(tally: &EquipmentTally, result: &TallyResult) -> EquipmentDiagnosis {
    let keywords = result
        .keyword_table
        .keywords_for(&tally.equipment_type)
        .unwrap_or(&[]);

    let by_keyword = keywords
        .iter()
        .map(|keyword| Breakdown {
            name: keyword.clone(),
            count: tally
                .matches
                .iter()
                .filter(|m| &m.matched_keyword == keyword)
                .count(),
        })
        .collect();

    // 重複列は1行にまとめる
    let mut columns: Vec<&String> = Vec::new();
    for column in &result.search_columns {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    let by_column = columns
        .into_iter()
        .map(|column| Breakdown {
            name: column.clone(),
            count: tally.matches.iter().filter(|m| &m.column == column).count(),
        })
        .collect();

    EquipmentDiagnosis {
        equipment_type: tally.equipment_type.clone(),
        total_matches: tally.count,
        distinct_records: tally.distinct_records(),
        by_keyword,
        by_column,
    }
}
