//! E2E Integration Tests
//!
//! 測試整理流程在邊界情況下的行為

use std::fs;
use std::sync::atomic::AtomicBool;

use auto_folder_organize::component::folder_organizer::{DispatchMode, dispatch, scan};
use auto_folder_organize::{
    CategoryTable, DispatchReport, OrganizeError, OrganizeOptions, organize_folder,
};
use tempfile::TempDir;

fn table() -> CategoryTable {
    CategoryTable::embedded().unwrap()
}

/// 測試：根路徑是檔案時回報錯誤
#[test]
fn test_root_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("not_a_dir.txt");
    fs::write(&file, "x").unwrap();

    let err = organize_folder(
        &file,
        &table(),
        &OrganizeOptions::default(),
        |_| {},
        &AtomicBool::new(false),
    )
    .unwrap_err();

    assert!(matches!(err, OrganizeError::NotADirectory { .. }));
    assert_eq!(fs::read_to_string(&file).unwrap(), "x");
}

/// 測試：子資料夾內容與子資料夾本身都不會被移動
#[test]
fn test_nested_directories_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("projects/src")).unwrap();
    fs::write(root.join("projects/src/notes.txt"), "nested").unwrap();
    fs::write(root.join("projects/cover.jpg"), "nested").unwrap();
    fs::write(root.join("report.pdf"), "top").unwrap();

    let report = organize_folder(
        root,
        &table(),
        &OrganizeOptions::default(),
        |_| {},
        &AtomicBool::new(false),
    )
    .unwrap();

    let summary = report.summary().unwrap();
    assert_eq!(summary.succeeded, 1);
    assert!(root.join("Documents/report.pdf").exists());
    assert!(root.join("projects/src/notes.txt").exists());
    assert!(root.join("projects/cover.jpg").exists());
    assert!(!root.join("Images").exists());
}

/// 測試：沒有副檔名與隱藏檔歸入 Others
#[test]
fn test_files_without_extension_go_to_others() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("Makefile"), "all:").unwrap();
    fs::write(root.join(".env"), "KEY=1").unwrap();

    let report = organize_folder(
        root,
        &table(),
        &OrganizeOptions::default(),
        |_| {},
        &AtomicBool::new(false),
    )
    .unwrap();

    assert_eq!(report.summary().unwrap().succeeded, 2);
    assert!(root.join("Others/Makefile").exists());
    assert!(root.join("Others/.env").exists());
}

/// 測試：中斷旗標已設定時不搬移任何檔案，但進度仍結束於總數
#[test]
fn test_cancelled_run_leaves_files_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for i in 0..5 {
        fs::write(root.join(format!("clip{i}.mov")), "video").unwrap();
    }

    let batch = scan(root, &table()).unwrap();
    let mut last = None;
    let report = dispatch(
        &batch,
        DispatchMode::default(),
        |p| last = Some(p),
        &AtomicBool::new(true),
    )
    .unwrap();

    let DispatchReport::Completed(summary) = report else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.cancelled, 5);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(last.map(|p| (p.completed, p.total)), Some((5, 5)));
    for i in 0..5 {
        assert!(root.join(format!("clip{i}.mov")).exists());
    }
    assert!(!root.join("Videos").exists());
}

/// 測試：工作執行緒數為 1 時仍可完成整批
#[test]
fn test_single_worker_pool() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for i in 0..8 {
        fs::write(root.join(format!("track{i}.aac")), "audio").unwrap();
    }

    let options = OrganizeOptions {
        use_concurrency: true,
        worker_count: std::num::NonZeroUsize::MIN,
    };
    let report =
        organize_folder(root, &table(), &options, |_| {}, &AtomicBool::new(false)).unwrap();

    assert_eq!(report.summary().unwrap().succeeded, 8);
    assert_eq!(fs::read_dir(root.join("Audio")).unwrap().count(), 8);
}
