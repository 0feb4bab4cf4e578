//! ファイルによるキー・バリューストア
//!
//! ブラウザのlocalStorageに相当する。1つのJSONオブジェクトファイルに
//! キーごとの文字列を保存する。

use fishy_dex_common::{Broadcaster, KeyValueStore, SeenStore};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// CLIで使う既見セットストア
pub type CliSeenStore = SeenStore<FileStore, Broadcaster>;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> fishy_dex_common::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> fishy_dex_common::Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> fishy_dex_common::Result<()> {
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "storage file unreadable, starting over");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 一時ファイルに書いてから置き換える
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// ファイルストアとプロセス内通知で既見セットストアを作る
pub fn open_seen_store(path: impl Into<PathBuf>) -> CliSeenStore {
    SeenStore::new(FileStore::new(path), Broadcaster::new())
}
