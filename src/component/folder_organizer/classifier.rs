//! 副檔名分類
//!
//! 純查表，未符合任何規則（包含沒有副檔名）的檔案一律歸入 `Others`

use crate::config::{CategoryTable, OTHERS_CATEGORY, normalize_extension};
use std::path::Path;

/// 檔案分類器
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a CategoryTable,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub const fn new(table: &'a CategoryTable) -> Self {
        Self { table }
    }

    /// 依副檔名取得分類，大小寫不敏感，前導點可省略
    #[must_use]
    pub fn classify(&self, extension: &str) -> &'a str {
        let normalized = normalize_extension(extension);
        if normalized.is_empty() {
            return OTHERS_CATEGORY;
        }
        self.table
            .category_of(&normalized)
            .unwrap_or(OTHERS_CATEGORY)
    }

    /// 依檔名分類，由最長的多段副檔名開始比對
    ///
    /// `backup.tar.gz` 先比對 `.tar.gz` 再比對 `.gz`；
    /// 以點開頭且沒有其他點的檔名（如 `.bashrc`）視為沒有副檔名。
    #[must_use]
    pub fn classify_path(&self, path: &Path) -> &'a str {
        let Some(file_name) = path.file_name() else {
            return OTHERS_CATEGORY;
        };
        let name = file_name.to_string_lossy().to_lowercase();

        name.char_indices()
            .filter(|&(i, c)| c == '.' && i > 0)
            .find_map(|(i, _)| self.table.category_of(&name[i..]))
            .unwrap_or(OTHERS_CATEGORY)
    }
}
