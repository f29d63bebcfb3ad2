use crate::error::OrganizeError;
use std::io;
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<(), OrganizeError> {
    if !path.exists() {
        return Err(OrganizeError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// 建立資料夾，已存在時不視為錯誤
pub fn ensure_directory_exists(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}
