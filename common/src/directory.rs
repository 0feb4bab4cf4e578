//! ダイビングセンター一覧
//!
//! 名前または住所の部分一致で絞り込み、名前で並べ替える。
//! 読み取り専用（永続化・リモート更新なし）。

use crate::types::DivingCenter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 並べ替えキー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySort {
    #[default]
    Name,
}

impl FromStr for DirectorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(DirectorySort::Name),
            _ => Err(format!("不明な並べ替えキー: {} (name)", s)),
        }
    }
}

/// 比較の第一キー。分解してアクセント記号を落とし、小文字にそろえる
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 表示用の比較
///
/// アクセントと大文字小文字を無視して比較し、同じ場合はアクセント無しを先、
/// さらに同じ場合は小文字を先にする。
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// 名前または住所の部分一致（大文字小文字を区別しない）
pub fn center_matches(center: &DivingCenter, query: &str) -> bool {
    let query = query.to_lowercase();
    center.name.to_lowercase().contains(&query)
        || center
            .address
            .as_deref()
            .is_some_and(|address| address.to_lowercase().contains(&query))
}

/// 絞り込み → 並べ替え
pub fn filter_centers<'a>(
    centers: &'a [DivingCenter],
    query: &str,
    sort: DirectorySort,
) -> Vec<&'a DivingCenter> {
    let mut found: Vec<&DivingCenter> = centers
        .iter()
        .filter(|center| center_matches(center, query))
        .collect();

    match sort {
        DirectorySort::Name => found.sort_by(|a, b| collate(&a.name, &b.name)),
    }

    found
}

/// 一覧フッター
pub fn directory_footer(shown: usize, total: usize) -> String {
    format!("Showing {} of {} diving centers", shown, total)
}
