use crate::config::normalize_extension;
use log::warn;
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 掃描到的單一檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_name: OsString,
    /// 小寫、含前導點的最後一段副檔名，沒有副檔名時為空字串
    pub extension: String,
    pub size: u64,
}

impl FileEntry {
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Option<Self> {
        let file_name = path.file_name()?.to_os_string();
        let extension = path
            .extension()
            .map(|ext| normalize_extension(&ext.to_string_lossy()))
            .unwrap_or_default();

        Some(Self {
            path,
            file_name,
            extension,
            size,
        })
    }

    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        self.file_name.to_string_lossy()
    }
}

/// 列出目錄第一層的一般檔案，依目錄列舉順序回傳
///
/// 不進入子資料夾，也不跟隨符號連結。無法讀取的項目會記錄後略過。
#[must_use]
pub fn scan_top_level_files(directory: &Path) -> Vec<FileEntry> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("略過無法讀取的項目: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("無法取得檔案資訊 {}: {e}", entry.path().display());
                    return None;
                }
            };
            FileEntry::new(entry.into_path(), size)
        })
        .collect()
}
