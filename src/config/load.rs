use crate::config::types::{
    CategoryRule, CategoryTable, Config, OTHERS_CATEGORY, UserSettings, normalize_extension,
};
use crate::error::ConfigError;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// 編譯時嵌入的分類表（不需要外部檔案）
const CATEGORY_TABLE_JSON: &str = include_str!("data/category_table.json");

/// 正規化後的副檔名格式，允許 `.tar.gz` 這類多段副檔名
static REGEX_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.[a-z0-9][a-z0-9_+\-]*(\.[a-z0-9][a-z0-9_+\-]*)*$").expect("Invalid regex")
});

impl Config {
    pub fn new() -> Result<Self> {
        let category_table =
            CategoryTable::embedded().context("無法解析嵌入的分類表設定")?;
        let settings = Self::load_settings().unwrap_or_default();

        Ok(Self {
            category_table,
            settings,
        })
    }

    fn load_settings() -> Result<UserSettings> {
        let path = Path::new("settings.json");
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

impl CategoryTable {
    /// 從編譯時嵌入的 JSON 載入預設分類表
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(CATEGORY_TABLE_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Vec<CategoryRule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    /// 依序建立分類表並驗證
    ///
    /// 同一副檔名被兩個分類宣告時直接拒絕，不採「後者覆蓋」。
    pub fn from_rules(rules: Vec<CategoryRule>) -> Result<Self, ConfigError> {
        let mut extension_map: HashMap<String, String> = HashMap::new();
        let mut normalized_rules: Vec<CategoryRule> = Vec::with_capacity(rules.len());

        for rule in rules {
            let category = rule.category.trim().to_string();
            if category.is_empty() {
                return Err(ConfigError::EmptyCategory);
            }
            if category.eq_ignore_ascii_case(OTHERS_CATEGORY) {
                return Err(ConfigError::ReservedCategory { category });
            }
            if normalized_rules.iter().any(|r| r.category == category) {
                return Err(ConfigError::DuplicateCategory { category });
            }

            let mut extensions = Vec::with_capacity(rule.extensions.len());
            for raw in &rule.extensions {
                let extension = normalize_extension(raw);
                if !REGEX_EXTENSION.is_match(&extension) {
                    return Err(ConfigError::InvalidExtension {
                        category,
                        extension: raw.clone(),
                    });
                }
                if let Some(first) = extension_map.get(&extension) {
                    return Err(ConfigError::DuplicateExtension {
                        extension,
                        first: first.clone(),
                        second: category,
                    });
                }
                extension_map.insert(extension.clone(), category.clone());
                extensions.push(extension);
            }

            normalized_rules.push(CategoryRule {
                category,
                extensions,
            });
        }

        Ok(Self {
            rules: normalized_rules,
            extension_map,
        })
    }
}
