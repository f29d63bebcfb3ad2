//! 搬移任務調度
//!
//! 將分類批次攤平成任務序列，依模式逐一或以固定大小的執行緒池執行，
//! 每完成一個任務回報一次進度，最後彙總結果。

use super::relocator::{OutcomeStatus, RelocationOutcome, RelocationTask, relocate};
use super::scanner::CategorizedBatch;
use crate::config::DEFAULT_WORKER_COUNT;
use crate::error::{OrganizeError, RelocationError};
use log::{info, warn};
use rayon::ThreadPoolBuilder;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

/// 執行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// 依攤平順序逐一執行
    Sequential,
    /// 固定數量的工作執行緒，進度依完成順序回報
    Concurrent { workers: NonZeroUsize },
}

impl Default for DispatchMode {
    fn default() -> Self {
        Self::Concurrent {
            workers: default_worker_count(),
        }
    }
}

#[must_use]
pub const fn default_worker_count() -> NonZeroUsize {
    match NonZeroUsize::new(DEFAULT_WORKER_COUNT) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    }
}

/// 進度事件，`completed` 單調遞增，最後一次等於 `total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// 單一失敗紀錄
#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub cause: RelocationError,
}

/// 整理結果彙總
#[derive(Debug, Default)]
pub struct Summary {
    /// 實際嘗試搬移的檔案數（不含取消的任務）
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub failures: Vec<Failure>,
    /// 各分類成功搬移的數量
    pub category_counts: BTreeMap<String, usize>,
}

impl Summary {
    fn record(&mut self, outcome: RelocationOutcome) {
        let RelocationOutcome { task, status } = outcome;
        match status {
            OutcomeStatus::Moved => {
                self.attempted += 1;
                self.succeeded += 1;
                *self.category_counts.entry(task.category).or_insert(0) += 1;
            }
            OutcomeStatus::Failed(cause) => {
                warn!("移動檔案失敗 {}: {cause}", task.entry.path.display());
                self.attempted += 1;
                self.failed += 1;
                self.failures.push(Failure {
                    source: task.entry.path,
                    cause,
                });
            }
            OutcomeStatus::Cancelled => self.cancelled += 1,
        }
    }

    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.attempted + self.cancelled
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.failed > 0 || self.cancelled > 0
    }
}

/// 調度結果
#[derive(Debug)]
pub enum DispatchReport {
    /// 沒有任何檔案需要整理，未對檔案系統做任何事
    NothingToOrganize,
    Completed(Summary),
}

impl DispatchReport {
    #[must_use]
    pub const fn summary(&self) -> Option<&Summary> {
        match self {
            Self::NothingToOrganize => None,
            Self::Completed(summary) => Some(summary),
        }
    }
}

/// 攤平批次：分類依批次順序，分類內依掃描順序
#[must_use]
pub fn flatten(batch: &CategorizedBatch) -> Vec<RelocationTask> {
    batch
        .iter()
        .flat_map(|(category, files)| {
            files
                .iter()
                .map(move |entry| RelocationTask::new(batch.root(), entry.clone(), category))
        })
        .collect()
}

/// 執行整批搬移
///
/// 個別檔案失敗只會記錄在 [`Summary::failures`]，不會中止其他任務。
/// `cancel` 被設定後，尚未開始的任務會以取消狀態回報，進行中的搬移不會被中斷。
///
/// # Errors
/// 只有在無法建立執行緒池時回傳錯誤，此時尚未執行任何任務。
pub fn dispatch<F>(
    batch: &CategorizedBatch,
    mode: DispatchMode,
    mut on_progress: F,
    cancel: &AtomicBool,
) -> Result<DispatchReport, OrganizeError>
where
    F: FnMut(Progress),
{
    let tasks = flatten(batch);
    if tasks.is_empty() {
        info!("沒有需要整理的檔案: {}", batch.root().display());
        return Ok(DispatchReport::NothingToOrganize);
    }

    info!(
        "開始整理 {} 個檔案 ({:?}): {}",
        tasks.len(),
        mode,
        batch.root().display()
    );

    let summary = match mode {
        DispatchMode::Sequential => run_sequential(tasks, &mut on_progress, cancel),
        DispatchMode::Concurrent { workers } => {
            run_concurrent(tasks, workers, &mut on_progress, cancel)?
        }
    };

    info!(
        "檔案整理完成 - 成功: {}, 失敗: {}, 取消: {}",
        summary.succeeded, summary.failed, summary.cancelled
    );

    Ok(DispatchReport::Completed(summary))
}

fn run_task(task: RelocationTask, cancel: &AtomicBool) -> RelocationOutcome {
    if cancel.load(Ordering::SeqCst) {
        RelocationOutcome::cancelled(task)
    } else {
        relocate(task)
    }
}

fn run_sequential<F>(
    tasks: Vec<RelocationTask>,
    on_progress: &mut F,
    cancel: &AtomicBool,
) -> Summary
where
    F: FnMut(Progress),
{
    let total = tasks.len();
    let mut summary = Summary::default();

    for (index, task) in tasks.into_iter().enumerate() {
        summary.record(run_task(task, cancel));
        on_progress(Progress {
            completed: index + 1,
            total,
        });
    }

    summary
}

/// 以固定大小的執行緒池執行
///
/// 執行緒池只存在於本次呼叫；所有任務都送出後，呼叫端執行緒從通道
/// 依完成順序收取結果並回報進度，scope 結束前會等待所有工作完成。
fn run_concurrent<F>(
    tasks: Vec<RelocationTask>,
    workers: NonZeroUsize,
    on_progress: &mut F,
    cancel: &AtomicBool,
) -> Result<Summary, OrganizeError>
where
    F: FnMut(Progress),
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.get())
        .thread_name(|i| format!("relocator-{i}"))
        .build()?;

    let total = tasks.len();
    let mut summary = Summary::default();
    let (sender, receiver) = mpsc::channel::<RelocationOutcome>();

    pool.in_place_scope(|scope| {
        for task in tasks {
            let sender = sender.clone();
            scope.spawn(move |_| {
                // 接收端只會在收齊結果後才結束，送出失敗可忽略
                let _ = sender.send(run_task(task, cancel));
            });
        }
        drop(sender);

        for (index, outcome) in receiver.iter().enumerate() {
            summary.record(outcome);
            on_progress(Progress {
                completed: index + 1,
                total,
            });
        }
    });

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::folder_organizer::scanner::scan;
    use crate::config::CategoryTable;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn concurrent(workers: usize) -> DispatchMode {
        DispatchMode::Concurrent {
            workers: NonZeroUsize::new(workers).unwrap(),
        }
    }

    fn write_files(root: &Path, names: &[&str]) {
        for name in names {
            fs::write(root.join(name), format!("content of {name}")).unwrap();
        }
    }

    fn run(root: &Path, mode: DispatchMode) -> (DispatchReport, Vec<Progress>) {
        let table = CategoryTable::embedded().unwrap();
        let batch = scan(root, &table).unwrap();
        let mut events = Vec::new();
        let report = dispatch(&batch, mode, |p| events.push(p), &AtomicBool::new(false)).unwrap();
        (report, events)
    }

    #[test]
    fn test_default_mode_is_four_workers() {
        assert_eq!(DispatchMode::default(), concurrent(4));
    }

    #[test]
    fn test_flatten_keeps_batch_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_files(root, &["b.pdf", "a.jpg", "c.xyz"]);

        let table = CategoryTable::embedded().unwrap();
        let batch = scan(root, &table).unwrap();
        let tasks = flatten(&batch);

        let categories: Vec<&str> = tasks.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["Documents", "Images", "Others"]);
        assert_eq!(tasks[1].destination, root.join("Images").join("a.jpg"));
    }

    #[test]
    fn test_empty_batch_is_nothing_to_organize() {
        let temp_dir = TempDir::new().unwrap();

        let (report, events) = run(temp_dir.path(), concurrent(4));

        assert!(matches!(report, DispatchReport::NothingToOrganize));
        assert!(report.summary().is_none());
        assert!(events.is_empty());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_sequential_progress_is_monotonic() {
        let temp_dir = TempDir::new().unwrap();
        write_files(temp_dir.path(), &["a.jpg", "b.pdf", "c.xyz", "d.mp3"]);

        let (report, events) = run(temp_dir.path(), DispatchMode::Sequential);

        let summary = report.summary().unwrap();
        assert_eq!(summary.succeeded, 4);
        assert_eq!(summary.failed, 0);
        let completed: Vec<usize> = events.iter().map(|p| p.completed).collect();
        assert_eq!(completed, vec![1, 2, 3, 4]);
        assert!(events.iter().all(|p| p.total == 4));
    }

    #[test]
    fn test_concurrent_progress_reaches_total() {
        let temp_dir = TempDir::new().unwrap();
        let names: Vec<String> = (0..40).map(|i| format!("file{i}.txt")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        write_files(temp_dir.path(), &refs);

        let (report, events) = run(temp_dir.path(), concurrent(3));

        let summary = report.summary().unwrap();
        assert_eq!(summary.attempted, 40);
        assert_eq!(summary.succeeded, 40);
        assert_eq!(summary.category_counts.get("Documents"), Some(&40));
        assert_eq!(events.len(), 40);
        assert!(events.windows(2).all(|w| w[1].completed == w[0].completed + 1));
        assert_eq!(events.last().unwrap().completed, 40);
    }

    #[test]
    fn test_failure_does_not_stop_other_tasks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_files(root, &["x.txt", "a.jpg", "b.mp4"]);
        fs::create_dir(root.join("Documents")).unwrap();
        fs::write(root.join("Documents/x.txt"), "already here").unwrap();

        let (report, _) = run(root, concurrent(2));

        let summary = report.summary().unwrap();
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].source, root.join("x.txt"));
        assert!(matches!(
            summary.failures[0].cause,
            RelocationError::DestinationExists { .. }
        ));
        assert!(root.join("Images/a.jpg").exists());
        assert!(root.join("Videos/b.mp4").exists());
    }

    #[test]
    fn test_cancelled_before_start_moves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_files(root, &["a.jpg", "b.pdf"]);

        let table = CategoryTable::embedded().unwrap();
        let batch = scan(root, &table).unwrap();

        for mode in [DispatchMode::Sequential, concurrent(2)] {
            let mut events = Vec::new();
            let report =
                dispatch(&batch, mode, |p| events.push(p), &AtomicBool::new(true)).unwrap();

            let summary = report.summary().unwrap();
            assert_eq!(summary.cancelled, 2);
            assert_eq!(summary.attempted, 0);
            assert_eq!(summary.total_tasks(), 2);
            assert!(summary.is_partial());
            assert_eq!(events.last().unwrap().completed, 2);
        }

        assert!(root.join("a.jpg").exists());
        assert!(!root.join("Images").exists());
    }
}
