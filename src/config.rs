use crate::error::{Result, TallyError};
use equipment_tally_common::DEFAULT_SAMPLE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const DATA_DIR_ENV: &str = "EQUIPMENT_TALLY_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 取り込み済みファイルの保存先
    pub data_dir: Option<PathBuf>,
    /// カスタムキーワード表（省略時は組み込み表）
    pub keywords_path: Option<PathBuf>,
    /// 明細を表示する設備種別
    pub highlight: String,
    pub sample_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            keywords_path: None,
            highlight: "Coils".into(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl Config {
    /// 既定の設定ファイルから読み込み（なければ既定値）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TallyError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TallyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("equipment-tally").join("config.json"))
    }

    /// 取り込みフォルダ（環境変数 → 設定 → 既定の順）
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let base = dirs::data_local_dir()
            .ok_or_else(|| TallyError::Config("データフォルダが見つかりません".into()))?;
        Ok(base.join("equipment-tally").join("imports"))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }
}
