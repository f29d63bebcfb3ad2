//! 掃描資料夾並依分類分組
//!
//! 只讀取不修改，可直接作為預覽（dry-run）使用

use super::classifier::Classifier;
use crate::config::CategoryTable;
use crate::error::OrganizeError;
use crate::tools::{FileEntry, scan_top_level_files, validate_directory_exists};
use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 一次整理的檔案批次：分類名稱 → 檔案（保持掃描順序）
///
/// 分類依名稱排序走訪，同一分類內的檔案維持目錄列舉順序。
#[derive(Debug, Clone, Default)]
pub struct CategorizedBatch {
    root: PathBuf,
    groups: BTreeMap<String, Vec<FileEntry>>,
}

impl CategorizedBatch {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FileEntry])> {
        self.groups
            .iter()
            .map(|(category, files)| (category.as_str(), files.as_slice()))
    }

    #[must_use]
    pub fn files_in(&self, category: &str) -> &[FileEntry] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// 掃描 `root` 第一層的檔案並分類
///
/// # Errors
/// `root` 不存在時回傳 [`OrganizeError::PathNotFound`]，不是資料夾時回傳
/// [`OrganizeError::NotADirectory`]。
pub fn scan(root: &Path, table: &CategoryTable) -> Result<CategorizedBatch, OrganizeError> {
    validate_directory_exists(root)?;
    info!("開始掃描目錄: {}", root.display());

    let classifier = Classifier::new(table);
    let mut groups: BTreeMap<String, Vec<FileEntry>> = BTreeMap::new();

    for entry in scan_top_level_files(root) {
        let category = classifier.classify_path(&entry.path);
        groups.entry(category.to_string()).or_default().push(entry);
    }

    let batch = CategorizedBatch {
        root: root.to_path_buf(),
        groups,
    };
    info!(
        "掃描到 {} 個待分類檔案，共 {} 個分類",
        batch.file_count(),
        batch.category_count()
    );

    Ok(batch)
}
