use crate::error::{FishyDexError, Result};
use fishy_dex_common::{Endpoints, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const API_URL_ENV: &str = "FISHY_DEX_API_URL";
const SESSION_ENV: &str = "FISHY_DEX_SESSION";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub session_token: Option<String>,
    /// 既見セットの保存先（省略時はデータディレクトリ）
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            session_token: None,
            store_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
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
            .ok_or_else(|| FishyDexError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fishy-dex").join("config.json"))
    }

    /// APIベースURL（環境変数を優先）
    pub fn api_base_url(&self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_base_url.clone(),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api_base_url())
    }

    /// セッショントークン（環境変数を優先）
    pub fn session_token(&self) -> Option<String> {
        match std::env::var(SESSION_ENV) {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self.session_token.clone(),
        }
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let data = dirs::data_dir()
            .ok_or_else(|| FishyDexError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("fishy-dex").join("storage.json"))
    }
}
