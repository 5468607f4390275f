//! 取り込み済みファイルの一覧
//!
//! アプリが保存した取り込みファイルを取り込みフォルダから探す。

use crate::error::{Result, TallyError};
use crate::importer::is_supported;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub modified: Option<SystemTime>,
}

/// 取り込みフォルダ直下の対応ファイル（ファイル名順）
pub fn list_imported_files(dir: &Path) -> Result<Vec<ImportedFile>> {
    if !dir.exists() {
        return Err(TallyError::DataDirNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_supported(path) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // Excelの一時ファイル
        if file_name.starts_with("~$") {
            continue;
        }

        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());

        files.push(ImportedFile {
            path: path.to_path_buf(),
            file_name,
            modified,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// 最後に更新された取り込みファイル
pub fn latest_imported_file(dir: &Path) -> Result<ImportedFile> {
    list_imported_files(dir)?
        .into_iter()
        .max_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.file_name.cmp(&b.file_name)))
        .ok_or_else(|| TallyError::NoImportedFiles(dir.display().to_string()))
}
