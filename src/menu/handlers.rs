use crate::component::FolderOrganizer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_folder_organizer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let mut organizer = FolderOrganizer::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = organizer.run() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }
    config.settings = organizer.settings().clone();

    pause(term)?;
    Ok(())
}
