pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod menu;
pub mod signal;
pub mod tools;

use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;

rust_i18n::i18n!("locales", fallback = "en-US");

pub use component::folder_organizer::{
    DispatchMode, DispatchReport, OrganizeOptions, Progress, Summary, organize_folder,
};
pub use config::{CategoryTable, Config};
pub use error::{ConfigError, OrganizeError, RelocationError};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style(t!("common.press_enter")).dim());
    term.read_line()?;
    Ok(())
}
