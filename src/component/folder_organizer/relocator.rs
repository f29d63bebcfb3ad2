//! 單一檔案搬移
//!
//! 同一檔案系統內使用 rename；跨檔案系統時改為「暫存檔複製、雜湊驗證、
//! 不覆蓋地定名、刪除來源」。任何失敗都不會在目標位置留下不完整的檔案。

use crate::error::RelocationError;
use crate::tools::{FileEntry, calculate_file_hash, ensure_directory_exists};
use log::{debug, warn};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 搬移任務
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationTask {
    pub entry: FileEntry,
    pub category: String,
    pub category_dir: PathBuf,
    /// `root/category/檔名`
    pub destination: PathBuf,
}

impl RelocationTask {
    #[must_use]
    pub fn new(root: &Path, entry: FileEntry, category: &str) -> Self {
        let category_dir = root.join(category);
        let destination = category_dir.join(&entry.file_name);
        Self {
            entry,
            category: category.to_string(),
            category_dir,
            destination,
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.entry.path
    }
}

/// 搬移結果狀態
#[derive(Debug)]
pub enum OutcomeStatus {
    Moved,
    Failed(RelocationError),
    /// 收到中斷訊號，任務未開始
    Cancelled,
}

/// 搬移結果
#[derive(Debug)]
pub struct RelocationOutcome {
    pub task: RelocationTask,
    pub status: OutcomeStatus,
}

impl RelocationOutcome {
    #[must_use]
    pub fn cancelled(task: RelocationTask) -> Self {
        Self {
            task,
            status: OutcomeStatus::Cancelled,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Moved)
    }
}

/// 執行單一搬移任務，失敗時將原因包在結果中回傳
#[must_use]
pub fn relocate(task: RelocationTask) -> RelocationOutcome {
    let status = match relocate_inner(&task) {
        Ok(()) => {
            debug!(
                "移動檔案: {} -> {}",
                task.source().display(),
                task.destination.display()
            );
            OutcomeStatus::Moved
        }
        Err(e) => OutcomeStatus::Failed(e),
    };

    RelocationOutcome { task, status }
}

fn relocate_inner(task: &RelocationTask) -> Result<(), RelocationError> {
    ensure_directory_exists(&task.category_dir).map_err(|source| {
        RelocationError::DirectoryCreation {
            dir: task.category_dir.clone(),
            source,
        }
    })?;

    move_file(task.source(), &task.destination)
}

/// 移動檔案，目標已存在（含失效的符號連結）時不覆蓋
fn move_file(from: &Path, to: &Path) -> Result<(), RelocationError> {
    if to.symlink_metadata().is_ok() {
        return Err(RelocationError::DestinationExists {
            to: to.to_path_buf(),
        });
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("跨檔案系統，改用複製後刪除: {}", from.display());
            copy_and_delete(from, to)
        }
        Err(e) => Err(RelocationError::from_io(e, from, to)),
    }
}

/// 複製檔案後刪除原檔案
///
/// 先寫入目標資料夾中的暫存檔並驗證雜湊，再以不覆蓋的方式定名。
/// 刪除原檔失敗時會移除已定名的目標檔，讓來源維持原狀。
fn copy_and_delete(from: &Path, to: &Path) -> Result<(), RelocationError> {
    let io_err = |e: io::Error| RelocationError::from_io(e, from, to);
    let target_dir = to.parent().unwrap_or_else(|| Path::new("."));

    let mut source = File::open(from).map_err(io_err)?;
    let permissions = source.metadata().map_err(io_err)?.permissions();

    let mut staged = NamedTempFile::new_in(target_dir).map_err(io_err)?;
    io::copy(&mut source, staged.as_file_mut()).map_err(io_err)?;
    staged.as_file().sync_all().map_err(io_err)?;

    let source_hash = calculate_file_hash(from).map_err(io_err)?;
    let staged_hash = calculate_file_hash(staged.path()).map_err(io_err)?;
    if source_hash != staged_hash {
        return Err(RelocationError::VerificationFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    fs::set_permissions(staged.path(), permissions).map_err(io_err)?;
    staged.persist_noclobber(to).map_err(|e| io_err(e.error))?;

    if let Err(e) = fs::remove_file(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            warn!("無法移除已複製的目標檔 {}: {cleanup}", to.display());
        }
        return Err(io_err(e));
    }

    Ok(())
}
