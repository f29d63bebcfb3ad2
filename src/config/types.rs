use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 未符合任何規則的檔案所屬分類
pub const OTHERS_CATEGORY: &str = "Others";

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設平行搬移的工作執行緒數
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// 單一分類規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub extensions: Vec<String>,
}

/// 副檔名對應分類表
///
/// 只能透過 [`CategoryTable::from_rules`] 建立，建立後不可變。
/// 副檔名一律以小寫、含前導點的形式儲存。
#[derive(Debug, Clone)]
pub struct CategoryTable {
    pub(crate) rules: Vec<CategoryRule>,
    pub(crate) extension_map: HashMap<String, String>,
}

impl CategoryTable {
    /// 依定義順序列出所有規則（已正規化）
    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// 查詢副檔名所屬分類，參數需已正規化
    #[must_use]
    pub fn category_of(&self, normalized_extension: &str) -> Option<&str> {
        self.extension_map
            .get(normalized_extension)
            .map(String::as_str)
    }

    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.category.as_str()).collect()
    }

    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.extension_map.len()
    }
}

/// 將副檔名正規化為小寫並補上前導點，空字串維持空字串
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.is_empty() || trimmed == "." {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 使用者設定（儲存於 settings.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub recent_paths: Vec<String>,
    pub use_concurrency: bool,
    pub worker_count: usize,
    pub language: Language,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            recent_paths: Vec::new(),
            use_concurrency: true,
            worker_count: DEFAULT_WORKER_COUNT,
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub category_table: CategoryTable,
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPG"), ".jpg");
        assert_eq!(normalize_extension(".Tar.GZ"), ".tar.gz");
        assert_eq!(normalize_extension(" .pdf "), ".pdf");
        assert_eq!(normalize_extension(""), "");
        assert_eq!(normalize_extension("."), "");
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: UserSettings = serde_json::from_str(r#"{"worker_count": 8}"#).unwrap();
        assert_eq!(settings.worker_count, 8);
        assert!(settings.use_concurrency);
        assert!(settings.recent_paths.is_empty());
        assert_eq!(settings.language, Language::EnUs);
    }

    #[test]
    fn test_language_serde_names() {
        let json = serde_json::to_string(&Language::ZhTw).unwrap();
        assert_eq!(json, r#""zh-TW""#);
        assert_eq!(Language::ZhTw.as_str(), "zh-TW");
    }
}
