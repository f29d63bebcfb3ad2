//! 依副檔名整理資料夾
//!
//! 掃描資料夾第一層的檔案，依副檔名分類後搬移到對應的分類資料夾

mod classifier;
mod dispatcher;
mod main;
mod organize;
mod relocator;
mod scanner;

pub use classifier::Classifier;
pub use dispatcher::{
    DispatchMode, DispatchReport, Failure, Progress, Summary, default_worker_count, dispatch,
    flatten,
};
pub use main::FolderOrganizer;
pub use organize::{OrganizeOptions, organize_folder};
pub use relocator::{OutcomeStatus, RelocationOutcome, RelocationTask, relocate};
pub use scanner::{CategorizedBatch, scan};
