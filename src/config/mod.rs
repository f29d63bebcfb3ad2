pub mod load;
pub mod save;
pub mod types;

pub use types::{
    CategoryRule, CategoryTable, Config, DEFAULT_WORKER_COUNT, Language, MAX_RECENT_PATHS,
    OTHERS_CATEGORY, UserSettings, normalize_extension,
};
