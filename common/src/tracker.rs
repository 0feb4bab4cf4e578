//! トラッカー画面（地図 + 一覧）の表示状態

use crate::store::KeyValueStore;
use crate::types::Fish;
use tracing::{debug, warn};

/// 地図パネルの既定幅（%）
pub const MAP_PANEL_DEFAULT: f32 = 65.0;
/// 地図パネルの最小幅（%）
pub const MAP_PANEL_MIN: f32 = 30.0;
/// 一覧パネルの最小幅（%）
pub const LIST_PANEL_MIN: f32 = 20.0;
/// 分割比の保存キー
pub const PANEL_SPLIT_KEY: &str = "fish-tracker-client";

/// 最新の目撃が新しい順に並べる。目撃日時が無いものは末尾（元の順序を維持）
pub fn sort_by_recent_sighting(fishes: &[Fish]) -> Vec<Fish> {
    let mut sorted = fishes.to_vec();
    sorted.sort_by(|a, b| b.last_seen().cmp(&a.last_seen()));
    sorted
}

/// 地図/一覧の分割比
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSplit {
    map: f32,
}

impl Default for PanelSplit {
    fn default() -> Self {
        Self {
            map: MAP_PANEL_DEFAULT,
        }
    }
}

impl PanelSplit {
    pub fn map(&self) -> f32 {
        self.map
    }

    pub fn list(&self) -> f32 {
        100.0 - self.map
    }

    /// 地図パネル幅を設定する。両パネルの最小幅を下回らないように丸める
    pub fn resize(&mut self, map: f32) {
        if map.is_nan() {
            return;
        }
        self.map = map.clamp(MAP_PANEL_MIN, 100.0 - LIST_PANEL_MIN);
    }

    /// 保存済みの分割比（`[地図, 一覧]` のJSON配列）を読む。無い・壊れている場合は既定値
    pub fn restore<S: KeyValueStore>(storage: &S) -> Self {
        let mut split = Self::default();
        let saved = match storage.get(PANEL_SPLIT_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                debug!(error = %e, "panel split unreadable");
                None
            }
        };
        let map = saved
            .and_then(|raw| serde_json::from_str::<Vec<f32>>(&raw).ok())
            .and_then(|sizes| sizes.first().copied());
        if let Some(map) = map {
            split.resize(map);
        }
        split
    }

    /// 分割比を保存する。失敗はログのみ
    pub fn save<S: KeyValueStore>(&self, storage: &S) {
        let raw = format!("[{},{}]", self.map(), self.list());
        if let Err(e) = storage.set(PANEL_SPLIT_KEY, &raw) {
            warn!(error = %e, "failed to persist panel split");
        }
    }
}

/// トラッカー画面の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracker {
    fishes: Vec<Fish>,
    sorted: Vec<Fish>,
    hovered: Option<String>,
    split: PanelSplit,
}

impl Tracker {
    pub fn new(fishes: Vec<Fish>) -> Self {
        let sorted = sort_by_recent_sighting(&fishes);
        Self {
            fishes,
            sorted,
            ..Default::default()
        }
    }

    /// 地図に描く魚（取得順）
    pub fn fishes(&self) -> &[Fish] {
        &self.fishes
    }

    /// 一覧に並べる魚（新しい目撃順）
    pub fn sorted(&self) -> &[Fish] {
        &self.sorted
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn set_hovered(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    /// 保存済みの分割比で始める
    pub fn with_split(mut self, split: PanelSplit) -> Self {
        self.split = split;
        self
    }

    pub fn split(&self) -> PanelSplit {
        self.split
    }

    pub fn resize(&mut self, map: f32) {
        self.split.resize(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Sighting;
    use chrono::{TimeZone, Utc};

    fn fish(id: &str, day: Option<u32>) -> Fish {
        Fish {
            id: id.to_string(),
            name: id.to_string(),
            rarity: Default::default(),
            latest_sighting: day.map(|d| Sighting {
                latitude: 0.0,
                longitude: 0.0,
                timestamp: Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap(),
            }),
            image: String::new(),
        }
    }

    #[test]
    fn test_sorted_most_recent_first() {
        let tracker = Tracker::new(vec![
            fish("old", Some(1)),
            fish("none", None),
            fish("new", Some(20)),
            fish("mid", Some(10)),
        ]);
        let ids: Vec<&str> = tracker.sorted().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "none"]);
        assert_eq!(tracker.fishes()[0].id, "old");
    }

    #[test]
    fn test_hover_highlight() {
        let mut tracker = Tracker::new(vec![fish("a", None), fish("b", None)]);
        assert!(!tracker.is_highlighted("a"));

        tracker.set_hovered(Some("a".to_string()));
        assert!(tracker.is_highlighted("a"));
        assert!(!tracker.is_highlighted("b"));

        tracker.set_hovered(None);
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn test_split_clamped() {
        let mut split = PanelSplit::default();
        assert_eq!(split.map(), 65.0);
        assert_eq!(split.list(), 35.0);

        split.resize(10.0);
        assert_eq!(split.map(), MAP_PANEL_MIN);

        split.resize(95.0);
        assert_eq!(split.map(), 80.0);
        assert_eq!(split.list(), LIST_PANEL_MIN);

        split.resize(f32::NAN);
        assert_eq!(split.map(), 80.0);
    }

    #[test]
    fn test_split_saved_and_restored() {
        let storage = MemoryStore::new();
        assert_eq!(PanelSplit::restore(&storage), PanelSplit::default());

        let mut split = PanelSplit::default();
        split.resize(50.0);
        split.save(&storage);
        assert_eq!(storage.get(PANEL_SPLIT_KEY).unwrap().as_deref(), Some("[50,50]"));

        let restored = PanelSplit::restore(&storage);
        assert_eq!(restored.map(), 50.0);

        let tracker = Tracker::new(vec![fish("a", None)]).with_split(restored);
        assert_eq!(tracker.split().list(), 50.0);
    }

    #[test]
    fn test_split_restore_clamps_and_ignores_garbage() {
        let storage = MemoryStore::with_entry(PANEL_SPLIT_KEY, "[5,95]");
        assert_eq!(PanelSplit::restore(&storage).map(), MAP_PANEL_MIN);

        let storage = MemoryStore::with_entry(PANEL_SPLIT_KEY, "not json");
        assert_eq!(PanelSplit::restore(&storage), PanelSplit::default());
    }
}
