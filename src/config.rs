use crate::ai_provider::AiProvider;
use crate::error::{DashboardError, Result};
use sentiment_dashboard_common::{RunSettings, DEFAULT_CHUNK_SIZE, DEFAULT_HISTOGRAM_BINS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: AiProvider,
    pub chunk_size: usize,
    pub histogram_bins: usize,
    pub classifier_command: Option<String>,
    pub classifier_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: AiProvider::Lexicon,
            chunk_size: DEFAULT_CHUNK_SIZE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            classifier_command: None,
            classifier_args: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 設定ファイルを読み込み（存在しない場合はデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            if config.histogram_bins == 0 {
                warn!(path = %path.display(), "histogram_bins is 0, using default");
                config.histogram_bins = DEFAULT_HISTOGRAM_BINS;
            }
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sentiment-dashboard").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DashboardError::Config("chunk_size は1以上にしてください".into()));
        }
        Ok(())
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            chunk_size: self.chunk_size,
            histogram_bins: self.histogram_bins,
        }
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
        if chunk_size == 0 {
            return Err(DashboardError::Config("chunk_size は1以上にしてください".into()));
        }
        self.chunk_size = chunk_size;
        Ok(())
    }

    pub fn set_command(&mut self, command: String, args: Vec<String>) {
        self.classifier_command = Some(command);
        self.classifier_args = args;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.chunk_size, 50);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.provider = AiProvider::Command;
        config.set_chunk_size(8).unwrap();
        config.set_command("python3".into(), vec!["classify.py".into()]);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"provider": "command"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider, AiProvider::Command);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = Config::default();
        assert!(config.set_chunk_size(0).is_err());

        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chunk_size": 0}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_zero_histogram_bins_falls_back() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"histogram_bins": 0}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.histogram_bins, DEFAULT_HISTOGRAM_BINS);
    }

    #[test]
    fn test_run_settings() {
        let config = Config::default();
        let settings = config.run_settings();
        assert_eq!(settings.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(settings.histogram_bins, DEFAULT_HISTOGRAM_BINS);
    }
}
