use crate::domain::model::{CategoryVocabulary, DateBias, DEFAULT_CATEGORIES, DEFAULT_CATEGORY};
use crate::utils::error::{ExpenseError, Result};
use crate::utils::validation::{validate_log_level, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub categories: CategoriesConfig,
    pub dates: DatesConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    pub vocabulary: Vec<String>,
    pub default: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            default: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    pub prefer_dates_from: DateBias,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ParserConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${EXPENSE_CATEGORY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn vocabulary(&self) -> Result<CategoryVocabulary> {
        CategoryVocabulary::new(self.categories.vocabulary.iter().cloned(), &self.categories.default)
    }

    pub fn date_bias(&self) -> DateBias {
        self.dates.prefer_dates_from
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().map(|l| l.level.as_str())
    }
}

impl Validate for ParserConfig {
    fn validate(&self) -> Result<()> {
        self.vocabulary()?;
        if let Some(level) = self.log_level() {
            validate_log_level("logging.level", level)?;
        }
        Ok(())
    }
}

impl TryFrom<&ParserConfig> for CategoryVocabulary {
    type Error = ExpenseError;

    fn try_from(config: &ParserConfig) -> Result<Self> {
        config.vocabulary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ParserConfig::from_toml_str("").unwrap();
        let vocabulary = config.vocabulary().unwrap();

        assert_eq!(vocabulary, CategoryVocabulary::default());
        assert_eq!(config.date_bias(), DateBias::Past);
        assert!(config.log_level().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[categories]
vocabulary = ["rent", "groceries", "fuel", "misc"]
default = "misc"

[dates]
prefer_dates_from = "future"

[logging]
level = "debug"
"#;

        let config = ParserConfig::from_toml_str(toml_content).unwrap();
        let vocabulary = CategoryVocabulary::try_from(&config).unwrap();

        assert_eq!(vocabulary.categories()[1], "groceries");
        assert_eq!(vocabulary.default_category(), "misc");
        assert_eq!(config.date_bias(), DateBias::Future);
        assert_eq!(config.log_level(), Some("debug"));
    }

    #[test]
    fn test_unknown_bias_is_rejected() {
        let toml_content = r#"
[dates]
prefer_dates_from = "sometime"
"#;
        let err = ParserConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, ExpenseError::TomlError(_)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VOICE_EXPENSE_TEST_DEFAULT", "misc");

        let toml_content = r#"
[categories]
vocabulary = ["food", "misc"]
default = "${VOICE_EXPENSE_TEST_DEFAULT}"
"#;

        let config = ParserConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.categories.default, "misc");

        std::env::remove_var("VOICE_EXPENSE_TEST_DEFAULT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[categories]
vocabulary = ["food", "bills"]
default = "other"
"#;

        let config = ParserConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let bad_level = ParserConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[categories]
vocabulary = ["travel", "other"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ParserConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.categories.vocabulary, vec!["travel", "other"]);
        assert_eq!(config.categories.default, "other");
    }
}
