//! 設備キーワード表
//!
//! 設備種別ごとのキーワード一覧。
//! 「coil」と「evaporator coil」のような包含関係はそのまま残す
//! （チャートの件数はこの重複込みで数えられている）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 設備種別1件分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentKeywords {
    pub label: String,
    pub keywords: Vec<String>,
}

impl EquipmentKeywords {
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// キーワード表（順序付き）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentKeywordTable {
    entries: Vec<EquipmentKeywords>,
}

impl EquipmentKeywordTable {
    /// セルは小文字化して照合するため、キーワードも小文字にそろえる
    pub fn new(mut entries: Vec<EquipmentKeywords>) -> Self {
        for entry in &mut entries {
            for keyword in &mut entry.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        Self { entries }
    }

    /// 組み込みの設備キーワード表
    pub fn reference() -> Self {
        Self::new(vec![
            EquipmentKeywords::new("Compressor", ["compressor", "compressors"]),
            EquipmentKeywords::new("Unit", ["unit", "units", "ac unit", "hvac unit"]),
            EquipmentKeywords::new(
                "Coils",
                ["coil", "coils", "evaporator coil", "condenser coil"],
            ),
            EquipmentKeywords::new("Motors", ["motor", "motors", "fan motor", "blower motor"]),
            EquipmentKeywords::new(
                "Filter Cleaned",
                ["filter", "filters", "filter cleaned", "cleaned filter"],
            ),
        ])
    }

    /// JSON文字列から読み込み
    ///
    /// `[{"label": "Coils", "keywords": ["coil", ...]}, ...]` 形式。
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<EquipmentKeywords> = serde_json::from_str(json)?;
        let table = Self::new(entries);
        table.validate()?;
        Ok(table)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// ラベル重複・空キーワードを検出
    pub fn validate(&self) -> Result<()> {
        let mut labels = HashSet::new();
        for entry in &self.entries {
            if entry.label.trim().is_empty() {
                return Err(Error::Config("設備種別の名前が空です".into()));
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(Error::Config(format!("設備種別が重複しています: {}", entry.label)));
            }
            if entry.keywords.iter().any(|k| k.is_empty()) {
                return Err(Error::Config(format!(
                    "空のキーワードがあります: {}",
                    entry.label
                )));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[EquipmentKeywords] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn keywords_for(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 同じ種別内で他のキーワードに含まれるキーワードの組 (短い方, 長い方)
    ///
    /// この組が1つのセルで二重に数えられる原因になる。
    pub fn overlapping_keywords(&self) -> Vec<KeywordOverlap> {
        let mut overlaps = Vec::new();
        for entry in &self.entries {
            for shorter in &entry.keywords {
                for longer in &entry.keywords {
                    if shorter != longer && longer.contains(shorter.as_str()) {
                        overlaps.push(KeywordOverlap {
                            equipment_type: entry.label.clone(),
                            shorter: shorter.clone(),
                            longer: longer.clone(),
                        });
                    }
                }
            }
        }
        overlaps
    }
}

/// キーワードの包含関係
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordOverlap {
    pub equipment_type: String,
    pub shorter: String,
    pub longer: String,
}
