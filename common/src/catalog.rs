//! カタログ一覧
//!
//! 魚のコレクションと既見セットのスナップショットを保持し、
//! フィルタ（all/seen/unseen）→ 名前検索の順に絞り込む。
//! 元の並び順は維持する。

use crate::store::SeenSet;
use crate::types::Fish;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 既見フィルタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Seen,
    Unseen,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Seen, FilterMode::Unseen];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Seen => "seen",
            FilterMode::Unseen => "unseen",
        }
    }

    pub fn matches(&self, seen: bool) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Seen => seen,
            FilterMode::Unseen => !seen,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "seen" | "spotted" => Ok(FilterMode::Seen),
            "unseen" => Ok(FilterMode::Unseen),
            _ => Err(format!("不明なフィルタ: {} (all/seen/unseen)", s)),
        }
    }
}

/// 件数集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub seen: usize,
    pub unseen: usize,
}

/// 名前の部分一致（大文字小文字を区別しない）。空クエリは全件一致
pub fn name_matches(name: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || name.to_lowercase().contains(&query)
}

/// 既見フィルタ → 名前検索の順で絞り込む
pub fn filter_fishes<'a>(
    fishes: &'a [Fish],
    seen: &SeenSet,
    mode: FilterMode,
    query: &str,
) -> Vec<&'a Fish> {
    fishes
        .iter()
        .filter(|fish| mode.matches(seen.contains(&fish.id)))
        .filter(|fish| name_matches(&fish.name, query))
        .collect()
}

/// コレクション全体の件数集計
///
/// 既見数はコレクション内の魚だけを数える。
pub fn catalog_stats(fishes: &[Fish], seen: &SeenSet) -> CatalogStats {
    let seen_count = fishes.iter().filter(|fish| seen.contains(&fish.id)).count();
    CatalogStats {
        total: fishes.len(),
        seen: seen_count,
        unseen: fishes.len() - seen_count,
    }
}

/// カタログの表示状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    fishes: Vec<Fish>,
    seen: SeenSet,
    filter: FilterMode,
    query: String,
}

impl Catalog {
    pub fn new(fishes: Vec<Fish>, seen: SeenSet) -> Self {
        Self {
            fishes,
            seen,
            ..Default::default()
        }
    }

    pub fn fishes(&self) -> &[Fish] {
        &self.fishes
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// 現在のフィルタと検索で絞り込んだ一覧
    pub fn visible(&self) -> Vec<&Fish> {
        filter_fishes(&self.fishes, &self.seen, self.filter, &self.query)
    }

    pub fn stats(&self) -> CatalogStats {
        catalog_stats(&self.fishes, &self.seen)
    }

    /// カードの切り替えを自分のコピーへ即時反映する
    pub fn apply_toggle(&mut self, id: &str, seen: bool) {
        self.seen.set(id, seen);
    }

    /// ストアからの通知で読み直した集合に置き換える
    pub fn resync(&mut self, seen: SeenSet) {
        self.seen = seen;
    }

    pub fn footer(&self) -> String {
        format!(
            "Showing {} of {} species",
            self.visible().len(),
            self.fishes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Broadcaster, MemoryStore, SeenStore};

    fn fish(id: &str, name: &str) -> Fish {
        Fish {
            id: id.to_string(),
            name: name.to_string(),
            rarity: Default::default(),
            latest_sighting: None,
            image: String::new(),
        }
    }

    fn sample() -> Vec<Fish> {
        vec![fish("a", "Clownfish"), fish("b", "Tang")]
    }

    fn ids(fishes: &[&Fish]) -> Vec<String> {
        fishes.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_filter_mode_parse() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!("SEEN".parse::<FilterMode>().unwrap(), FilterMode::Seen);
        assert_eq!("unseen".parse::<FilterMode>().unwrap(), FilterMode::Unseen);
        assert!("maybe".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let fishes = sample();
        for query in ["clown", "CLOWN", "Clown", "  clown "] {
            let found = filter_fishes(&fishes, &SeenSet::new(), FilterMode::All, query);
            assert_eq!(ids(&found), vec!["a"], "query = {query}");
        }
    }

    #[test]
    fn test_empty_query_matches_all() {
        let fishes = sample();
        let found = filter_fishes(&fishes, &SeenSet::new(), FilterMode::All, "");
        assert_eq!(ids(&found), vec!["a", "b"]);
    }

    #[test]
    fn test_seen_and_unseen_partition_collection() {
        let fishes = vec![
            fish("a", "Clownfish"),
            fish("b", "Tang"),
            fish("c", "Moray"),
            fish("d", "Grouper"),
        ];
        let snapshots: Vec<SeenSet> = vec![
            SeenSet::new(),
            ["a"].into_iter().collect(),
            ["b", "d", "zzz"].into_iter().collect(),
            ["a", "b", "c", "d"].into_iter().collect(),
        ];

        for seen in &snapshots {
            let seen_ids = ids(&filter_fishes(&fishes, seen, FilterMode::Seen, ""));
            let unseen_ids = ids(&filter_fishes(&fishes, seen, FilterMode::Unseen, ""));

            assert!(seen_ids.iter().all(|id| !unseen_ids.contains(id)));
            let mut union: Vec<String> = seen_ids.iter().chain(&unseen_ids).cloned().collect();
            union.sort();
            assert_eq!(union, vec!["a", "b", "c", "d"]);
        }
    }

    #[test]
    fn test_toggle_scenario() {
        let store = SeenStore::new(MemoryStore::new(), Broadcaster::new());
        let mut catalog = Catalog::new(sample(), store.read());

        catalog.set_filter(FilterMode::Unseen);
        assert_eq!(ids(&catalog.visible()), vec!["a", "b"]);

        catalog.apply_toggle("a", true);
        store.set_seen("a", true);

        assert_eq!(ids(&catalog.visible()), vec!["b"]);
        catalog.set_filter(FilterMode::Seen);
        assert_eq!(ids(&catalog.visible()), vec!["a"]);
    }

    #[test]
    fn test_filter_then_search_keeps_order() {
        let fishes = vec![
            fish("1", "Yellow Tang"),
            fish("2", "Clownfish"),
            fish("3", "Blue Tang"),
        ];
        let seen: SeenSet = ["2"].into_iter().collect();
        let found = filter_fishes(&fishes, &seen, FilterMode::Unseen, "tang");
        assert_eq!(ids(&found), vec!["1", "3"]);
    }

    #[test]
    fn test_stats_recomputed_on_resync() {
        let mut catalog = Catalog::new(sample(), SeenSet::new());
        assert_eq!(catalog.stats(), CatalogStats { total: 2, seen: 0, unseen: 2 });

        catalog.resync(["a", "not-in-collection"].into_iter().collect());
        assert_eq!(catalog.stats(), CatalogStats { total: 2, seen: 1, unseen: 1 });
    }

    #[test]
    fn test_footer() {
        let mut catalog = Catalog::new(sample(), SeenSet::new());
        catalog.set_query("tang");
        assert_eq!(catalog.footer(), "Showing 1 of 2 species");
    }
}
