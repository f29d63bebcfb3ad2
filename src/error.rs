//! 錯誤型別
//!
//! 分為三層：設定錯誤（啟動時）、整理錯誤（整批中止）、搬移錯誤（單一檔案，收集後回報）

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 分類表建立失敗
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("無法解析分類表 JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("分類名稱不可為空白")]
    EmptyCategory,

    #[error("分類名稱 {category} 為保留名稱")]
    ReservedCategory { category: String },

    #[error("分類 {category} 重複定義")]
    DuplicateCategory { category: String },

    #[error("分類 {category} 的副檔名格式錯誤: {extension:?}")]
    InvalidExtension { category: String, extension: String },

    #[error("副檔名 {extension} 同時屬於 {first} 與 {second}")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },
}

/// 使整次整理中止的錯誤，發生時不會動到任何檔案
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("路徑不存在: {}", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("路徑不是資料夾: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("無法建立工作執行緒池: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// 單一檔案搬移失敗，不影響其他檔案
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("無法建立分類資料夾 {}: {source}", .dir.display())]
    DirectoryCreation { dir: PathBuf, source: io::Error },

    #[error("來源檔案已不存在 {}: {source}", .from.display())]
    SourceMissing { from: PathBuf, source: io::Error },

    #[error("目標位置已有同名項目: {}", .to.display())]
    DestinationExists { to: PathBuf },

    #[error("權限不足 {} -> {}: {source}", .from.display(), .to.display())]
    PermissionDenied {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("複製後內容驗證失敗 {} -> {}", .from.display(), .to.display())]
    VerificationFailed { from: PathBuf, to: PathBuf },

    #[error("搬移失敗 {} -> {}: {source}", .from.display(), .to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl RelocationError {
    /// 依 `io::Error` 種類轉換為對應的搬移錯誤
    #[must_use]
    pub fn from_io(err: io::Error, from: &Path, to: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::SourceMissing {
                from: from.to_path_buf(),
                source: err,
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: err,
            },
            io::ErrorKind::AlreadyExists => Self::DestinationExists {
                to: to.to_path_buf(),
            },
            _ => Self::Io {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_error_kinds() {
        let from = Path::new("/src/a.txt");
        let to = Path::new("/dst/Documents/a.txt");

        let missing = RelocationError::from_io(io::Error::from(io::ErrorKind::NotFound), from, to);
        assert!(matches!(missing, RelocationError::SourceMissing { .. }));

        let denied =
            RelocationError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), from, to);
        assert!(matches!(denied, RelocationError::PermissionDenied { .. }));

        let exists =
            RelocationError::from_io(io::Error::from(io::ErrorKind::AlreadyExists), from, to);
        assert!(matches!(exists, RelocationError::DestinationExists { to: ref p } if p == to));

        let other = RelocationError::from_io(io::Error::other("boom"), from, to);
        assert!(matches!(other, RelocationError::Io { .. }));
    }

    #[test]
    fn test_path_not_found_message_contains_path() {
        let err = OrganizeError::PathNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.to_string().contains("/no/such/dir"));
    }
}
