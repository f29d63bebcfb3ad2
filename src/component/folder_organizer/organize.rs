//! 整理資料夾的呼叫入口：掃描後調度

use super::dispatcher::{DispatchMode, DispatchReport, Progress, default_worker_count, dispatch};
use super::scanner::scan;
use crate::config::{CategoryTable, UserSettings};
use crate::error::OrganizeError;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// 整理選項
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeOptions {
    pub use_concurrency: bool,
    pub worker_count: NonZeroUsize,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            use_concurrency: true,
            worker_count: default_worker_count(),
        }
    }
}

impl OrganizeOptions {
    /// 從使用者設定建立，工作執行緒數為 0 時改用預設值
    #[must_use]
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            use_concurrency: settings.use_concurrency,
            worker_count: NonZeroUsize::new(settings.worker_count)
                .unwrap_or_else(default_worker_count),
        }
    }
}

impl From<&OrganizeOptions> for DispatchMode {
    fn from(options: &OrganizeOptions) -> Self {
        if options.use_concurrency {
            Self::Concurrent {
                workers: options.worker_count,
            }
        } else {
            Self::Sequential
        }
    }
}

/// 整理 `root`：掃描第一層檔案並搬入各分類資料夾
///
/// # Errors
/// 路徑不存在或不是資料夾時，在建立任何任務之前回傳錯誤。
pub fn organize_folder<F>(
    root: &Path,
    table: &CategoryTable,
    options: &OrganizeOptions,
    on_progress: F,
    cancel: &AtomicBool,
) -> Result<DispatchReport, OrganizeError>
where
    F: FnMut(Progress),
{
    let batch = scan(root, table)?;
    dispatch(&batch, DispatchMode::from(options), on_progress, cancel)
}
