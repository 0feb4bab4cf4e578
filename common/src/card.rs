//! 魚カードの状態機械
//!
//! 各カードは `Seen` / `Unseen` の2状態を持つ。
//!
//! - マウント時にストアの所属判定で初期状態を決める
//! - 切り替えはユーザー操作のみ。表示を先に反転してからストアを更新する
//! - `Unseen -> Seen` のときだけ最終目撃日時のリモート更新を行う。
//!   失敗しても既見フラグは戻さない（再試行もしない）
//! - 切り替え後は一定時間だけ確認表示を出し、自動で消す

use crate::store::{ChangeNotifier, KeyValueStore, SeenSet, SeenStore};
use crate::types::Fish;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 確認表示の表示時間
pub const ACKNOWLEDGEMENT_DURATION: Duration = Duration::from_millis(900);

/// カードの既見状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenState {
    Seen,
    Unseen,
}

impl SeenState {
    pub fn from_seen(seen: bool) -> Self {
        if seen {
            SeenState::Seen
        } else {
            SeenState::Unseen
        }
    }

    pub fn is_seen(self) -> bool {
        matches!(self, SeenState::Seen)
    }

    pub fn flipped(self) -> Self {
        match self {
            SeenState::Seen => SeenState::Unseen,
            SeenState::Unseen => SeenState::Seen,
        }
    }

    pub fn badge_label(self) -> &'static str {
        match self {
            SeenState::Seen => "SPOTTED",
            SeenState::Unseen => "UNSEEN",
        }
    }

    /// 切り替えボタンの文言
    pub fn action_label(self) -> &'static str {
        match self {
            SeenState::Seen => "Mark unseen",
            SeenState::Unseen => "Mark spotted",
        }
    }

    /// 切り替え直後の確認メッセージ
    pub fn acknowledgement(self) -> &'static str {
        match self {
            SeenState::Seen => "Marked as spotted",
            SeenState::Unseen => "Marked as unseen",
        }
    }
}

/// 1回の切り替え操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub fish_id: String,
    pub state: SeenState,
    /// この切り替えの確認表示を識別するトークン
    pub acknowledgement: u64,
}

impl Toggle {
    /// ストアへ反映する（write → broadcast）
    pub fn commit<S: KeyValueStore, N: ChangeNotifier>(&self, store: &SeenStore<S, N>) {
        store.set_seen(&self.fish_id, self.state.is_seen());
    }

    /// 最終目撃日時のリモート更新が必要か
    pub fn needs_remote_update(&self) -> bool {
        self.state.is_seen()
    }
}

/// カードの表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    fish_id: String,
    state: SeenState,
    last_seen: Option<DateTime<Utc>>,
    acknowledgement: Option<u64>,
    next_token: u64,
}

impl CardState {
    /// ストアの所属判定で初期状態を決める
    pub fn mount<S: KeyValueStore, N: ChangeNotifier>(fish: &Fish, store: &SeenStore<S, N>) -> Self {
        Self::new(fish, store.contains(&fish.id))
    }

    pub fn new(fish: &Fish, seen: bool) -> Self {
        Self {
            fish_id: fish.id.clone(),
            state: SeenState::from_seen(seen),
            last_seen: fish.last_seen(),
            acknowledgement: None,
            next_token: 0,
        }
    }

    pub fn fish_id(&self) -> &str {
        &self.fish_id
    }

    pub fn state(&self) -> SeenState {
        self.state
    }

    pub fn is_seen(&self) -> bool {
        self.state.is_seen()
    }

    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    /// 表示中の確認メッセージ
    pub fn acknowledgement(&self) -> Option<&'static str> {
        self.acknowledgement.map(|_| self.state.acknowledgement())
    }

    /// 表示状態だけを反転し、ストアへ反映すべき操作を返す
    ///
    /// 反映は呼び出し側が `Toggle::commit` で行う。ブラウザでは通知が同期的に
    /// 配送されるため、状態を書き戻してからコミットする必要がある。
    pub fn begin_toggle(&mut self) -> Toggle {
        self.state = self.state.flipped();
        let token = self.next_token;
        self.next_token += 1;
        self.acknowledgement = Some(token);
        Toggle {
            fish_id: self.fish_id.clone(),
            state: self.state,
            acknowledgement: token,
        }
    }

    /// 表示の反転とストア反映をまとめて行う
    pub fn toggle<S: KeyValueStore, N: ChangeNotifier>(&mut self, store: &SeenStore<S, N>) -> Toggle {
        let toggle = self.begin_toggle();
        toggle.commit(store);
        toggle
    }

    /// 確認表示を消す。後続の切り替えの表示は消さない
    pub fn clear_acknowledgement(&mut self, token: u64) -> bool {
        if self.acknowledgement == Some(token) {
            self.acknowledgement = None;
            true
        } else {
            false
        }
    }

    /// リモート更新の結果を反映する。失敗時は何も変えない
    pub fn apply_remote_result<E>(&mut self, result: Result<DateTime<Utc>, E>) {
        if let Ok(timestamp) = result {
            self.last_seen = Some(timestamp);
        }
    }

    /// 他のカードや他タブでの変更に追従する
    pub fn resync(&mut self, set: &SeenSet) -> bool {
        let state = SeenState::from_seen(set.contains(&self.fish_id));
        let changed = state != self.state;
        self.state = state;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Broadcaster, MemoryStore};
    use chrono::TimeZone;

    fn fish(id: &str, timestamp: Option<DateTime<Utc>>) -> Fish {
        Fish {
            id: id.to_string(),
            name: "Clownfish".to_string(),
            rarity: Default::default(),
            latest_sighting: timestamp.map(|timestamp| crate::types::Sighting {
                latitude: 0.0,
                longitude: 0.0,
                timestamp,
            }),
            image: String::new(),
        }
    }

    fn store() -> SeenStore<MemoryStore, Broadcaster> {
        SeenStore::new(MemoryStore::new(), Broadcaster::new())
    }

    #[test]
    fn test_mount_reads_membership() {
        let store = store();
        store.set_seen("a", true);

        assert!(CardState::mount(&fish("a", None), &store).is_seen());
        assert!(!CardState::mount(&fish("b", None), &store).is_seen());
    }

    #[test]
    fn test_toggle_to_seen_requests_remote_update() {
        let store = store();
        let mut card = CardState::mount(&fish("a", None), &store);

        let toggle = card.toggle(&store);

        assert!(card.is_seen());
        assert!(store.contains("a"));
        assert!(toggle.needs_remote_update());
        assert_eq!(card.acknowledgement(), Some("Marked as spotted"));
    }

    #[test]
    fn test_toggle_to_unseen_skips_remote_update() {
        let store = store();
        store.set_seen("a", true);
        let mut card = CardState::mount(&fish("a", None), &store);

        let toggle = card.toggle(&store);

        assert!(!card.is_seen());
        assert!(!store.contains("a"));
        assert!(!toggle.needs_remote_update());
        assert_eq!(card.acknowledgement(), Some("Marked as unseen"));
    }

    #[test]
    fn test_remote_success_updates_last_seen() {
        let store = store();
        let mut card = CardState::mount(&fish("a", None), &store);
        card.toggle(&store);

        let echoed = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        card.apply_remote_result::<()>(Ok(echoed));

        assert_eq!(card.last_seen(), Some(echoed));
    }

    #[test]
    fn test_remote_failure_keeps_seen_and_prior_timestamp() {
        let prior = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let store = store();
        let mut card = CardState::mount(&fish("a", Some(prior)), &store);

        card.toggle(&store);
        card.apply_remote_result(Err("connection refused"));

        assert!(card.is_seen());
        assert!(store.contains("a"));
        assert_eq!(card.last_seen(), Some(prior));
    }

    #[test]
    fn test_stale_acknowledgement_timer_is_ignored() {
        let store = store();
        let mut card = CardState::mount(&fish("a", None), &store);

        let first = card.toggle(&store);
        let second = card.toggle(&store);

        assert!(!card.clear_acknowledgement(first.acknowledgement));
        assert_eq!(card.acknowledgement(), Some("Marked as unseen"));
        assert!(card.clear_acknowledgement(second.acknowledgement));
        assert_eq!(card.acknowledgement(), None);
    }

    #[test]
    fn test_resync_follows_out_of_band_change() {
        let store = store();
        let mut card = CardState::mount(&fish("a", None), &store);

        store.set_seen("a", true);
        assert!(card.resync(&store.read()));
        assert!(card.is_seen());
        assert!(!card.resync(&store.read()));
    }

    #[test]
    fn test_cards_for_same_fish_stay_in_sync() {
        let broadcaster = Broadcaster::new();
        let store = SeenStore::new(MemoryStore::new(), broadcaster.clone());
        let other = std::sync::Arc::new(std::sync::Mutex::new(CardState::mount(&fish("a", None), &store)));

        let reader = store.clone();
        let mirror = std::sync::Arc::clone(&other);
        broadcaster.subscribe(move |_| {
            if let Ok(mut card) = mirror.lock() {
                card.resync(&reader.read());
            }
        });

        let mut card = CardState::mount(&fish("a", None), &store);
        card.toggle(&store);

        assert!(other.lock().unwrap().is_seen());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SeenState::Seen.badge_label(), "SPOTTED");
        assert_eq!(SeenState::Unseen.action_label(), "Mark spotted");
        assert_eq!(SeenState::Seen.action_label(), "Mark unseen");
    }
}
