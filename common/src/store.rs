//! 既見セット（Seen-Set）ストア
//!
//! 目撃済みの魚IDの集合を、キー・バリューストアの単一スロット
//! (`seenFishIds`) にJSON配列として永続化する。
//!
//! - 読み込み: スロットが無い/壊れている場合は空集合
//! - 書き込み: 失敗は握りつぶす（ログのみ）
//! - 変更通知: 書き込みの後にキーだけを通知する。受信側は `read()` し直す
//!
//! 保存先と通知手段はトレイトで注入する。ブラウザではlocalStorageと
//! `storage` イベント、CLIではファイルとプロセス内ブロードキャストを使う。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// 既見セットの保存キー
pub const SEEN_STORE_KEY: &str = "seenFishIds";

/// キー・バリューストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// 変更通知（ペイロードはキーのみ）
pub trait ChangeNotifier {
    fn notify(&self, key: &str);
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Arc<T> {
    fn notify(&self, key: &str) {
        (**self).notify(key)
    }
}

/// 既見の魚IDの集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet(BTreeSet<String>);

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化された文字列を解釈する。壊れた内容は空集合として扱う
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    /// `seen` に応じて追加または削除
    pub fn set(&mut self, id: &str, seen: bool) {
        if seen {
            self.0.insert(id.to_string());
        } else {
            self.0.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// 既見セットストア
///
/// 変更は必ず `write` → `broadcast` の順に行う。
#[derive(Debug, Clone, Copy)]
pub struct SeenStore<S, N> {
    storage: S,
    notifier: N,
}

impl<S: KeyValueStore, N: ChangeNotifier> SeenStore<S, N> {
    pub fn new(storage: S, notifier: N) -> Self {
        Self { storage, notifier }
    }

    pub fn read(&self) -> SeenSet {
        match self.storage.get(SEEN_STORE_KEY) {
            Ok(Some(raw)) => SeenSet::parse(&raw),
            Ok(None) => SeenSet::new(),
            Err(e) => {
                debug!(error = %e, "seen set unreadable, treating as empty");
                SeenSet::new()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains(id)
    }

    pub fn write(&self, set: &SeenSet) {
        if let Err(e) = self.storage.set(SEEN_STORE_KEY, &set.to_json()) {
            warn!(error = %e, "failed to persist seen set");
        }
    }

    pub fn broadcast(&self) {
        self.notifier.notify(SEEN_STORE_KEY);
    }

    /// IDの既見状態を設定し、保存後に通知する。更新後の集合を返す
    pub fn set_seen(&self, id: &str, seen: bool) -> SeenSet {
        let mut set = self.read();
        set.set(id, seen);
        self.write(&set);
        self.broadcast();
        set
    }

    /// IDの既見状態を反転する。反転後に既見ならtrue
    pub fn toggle(&self, id: &str) -> bool {
        let seen = !self.contains(id);
        self.set_seen(id, seen);
        seen
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// メモリ上のキー・バリューストア
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// 購読ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// プロセス内の変更通知（publish/subscribe）
#[derive(Clone, Default)]
pub struct Broadcaster {
    listeners: Arc<Mutex<Listeners>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id.0);
        listeners.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

impl ChangeNotifier for Broadcaster {
    fn notify(&self, key: &str) {
        // ロックを外してから呼ぶ（リスナー内での購読・解除を許す）
        let snapshot: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(key);
        }
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
