use super::dispatcher::{DispatchMode, DispatchReport, Summary, dispatch};
use super::organize::OrganizeOptions;
use super::scanner::{CategorizedBatch, scan};
use crate::config::{Config, UserSettings};
use crate::config::save::{add_recent_path, save_settings};
use crate::error::OrganizeError;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 依副檔名整理資料夾元件
pub struct FolderOrganizer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl FolderOrganizer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        &self.config.settings
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style(t!("organize.title")).cyan().bold());

        let Some(input_path) = self.prompt_input_path()? else {
            return Ok(()); // ESC pressed
        };
        let directory = PathBuf::from(&input_path);

        // 掃描並分類（不會修改任何檔案）
        println!("{}", style(t!("organize.scanning")).dim());
        let batch = match scan(&directory, &self.config.category_table) {
            Ok(batch) => batch,
            Err(e @ (OrganizeError::PathNotFound { .. } | OrganizeError::NotADirectory { .. })) => {
                error!("{e}");
                println!("{}", style(t!("organize.invalid_path", path = input_path)).red());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        // 更新路徑歷史並儲存
        add_recent_path(&mut self.config.settings, &input_path);
        if let Err(e) = save_settings(&self.config.settings) {
            warn!("無法儲存路徑歷史: {e}");
        }

        if batch.is_empty() {
            println!("{}", style(t!("organize.nothing")).yellow());
            return Ok(());
        }

        self.print_category_summary(&batch);

        if !self.confirm_move()? {
            println!("{}", style(t!("organize.cancelled_by_user")).yellow());
            return Ok(());
        }

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        let options = OrganizeOptions::from_settings(&self.config.settings);
        let report = self.run_with_progress(&batch, &options)?;

        match report {
            DispatchReport::NothingToOrganize => {
                println!("{}", style(t!("organize.nothing")).yellow());
            }
            DispatchReport::Completed(summary) => self.print_result(&summary, &directory),
        }

        Ok(())
    }

    fn run_with_progress(
        &self,
        batch: &CategorizedBatch,
        options: &OrganizeOptions,
    ) -> Result<DispatchReport> {
        let progress_bar = ProgressBar::new(batch.file_count() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message(t!("organize.moving").to_string());

        let report = dispatch(
            batch,
            DispatchMode::from(options),
            |progress| progress_bar.set_position(progress.completed as u64),
            &self.shutdown_signal,
        )?;

        progress_bar.finish_with_message(t!("organize.done").to_string());
        Ok(report)
    }

    fn prompt_input_path(&self) -> Result<Option<String>> {
        let recent_paths = &self.config.settings.recent_paths;

        if recent_paths.is_empty() {
            return Ok(Some(Self::prompt_new_path()?));
        }

        // 建立選項清單：歷史路徑 + 輸入新路徑
        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("organize.new_path").to_string());

        println!("{}", style(t!("common.esc_hint")).dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("organize.path_select"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => Ok(Some(Self::prompt_new_path()?)),
        }
    }

    fn prompt_new_path() -> Result<String> {
        let path: String = Input::new()
            .with_prompt(t!("organize.path_prompt"))
            .interact_text()?;
        Ok(path.trim().to_string())
    }

    fn confirm_move(&self) -> Result<bool> {
        let confirm = Confirm::new()
            .with_prompt(t!("organize.confirm"))
            .default(true)
            .interact()?;
        Ok(confirm)
    }

    fn print_category_summary(&self, batch: &CategorizedBatch) {
        println!();
        println!(
            "{}",
            style(t!("organize.found", count = batch.file_count())).green()
        );
        println!();

        // 按檔案數量排序
        let mut groups: Vec<_> = batch.iter().collect();
        groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        for (category, files) in groups {
            let size: u64 = files.iter().map(|f| f.size).sum();
            let size_mb = size as f64 / 1024.0 / 1024.0;

            println!(
                "  {} {} - {}",
                style("→").dim(),
                style(category).cyan(),
                t!(
                    "organize.category_line",
                    count = files.len(),
                    size = format!("{size_mb:.2}")
                )
            );
        }

        println!();
    }

    fn print_result(&self, summary: &Summary, directory: &Path) {
        println!();
        println!("{}", style(t!("organize.result_title")).cyan().bold());
        println!(
            "  {}",
            style(t!("organize.moved", count = summary.succeeded)).green()
        );

        if summary.failed > 0 {
            println!(
                "  {}",
                style(t!("organize.failed", count = summary.failed)).red()
            );
        }

        if summary.cancelled > 0 {
            println!(
                "  {}",
                style(t!("organize.cancelled", count = summary.cancelled)).yellow()
            );
        }

        if !summary.category_counts.is_empty() {
            println!();
            println!("{}", style(t!("organize.category_stats")).dim());

            let mut sorted_counts: Vec<_> = summary.category_counts.iter().collect();
            sorted_counts.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in sorted_counts {
                println!("  {} {}: {}", style("•").dim(), category, count);
            }
        }

        if !summary.failures.is_empty() {
            println!();
            println!("{}", style(t!("organize.failures_title")).red());
            for failure in &summary.failures {
                println!(
                    "  {} {}: {}",
                    style("✗").red(),
                    failure.source.display(),
                    failure.cause
                );
            }
        }

        info!(
            "{} 整理完成 - 移動: {}, 失敗: {}, 取消: {}",
            directory.display(),
            summary.succeeded,
            summary.failed,
            summary.cancelled
        );
    }
}
