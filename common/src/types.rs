//! データモデルの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Fish: 魚種（サーバーが正）
//! - Sighting: 最新の目撃情報
//! - DivingCenter: ダイビングセンター（読み取り専用）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 魚種
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fish {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: Rarity,
    #[serde(default)]
    pub latest_sighting: Option<Sighting>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

/// `null` を既定値として読む（キー欠落は `#[serde(default)]` 側で扱う）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Fish {
    /// 最終目撃日時（未目撃ならNone）
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.latest_sighting.as_ref().map(|s| s.timestamp)
    }
}

/// 目撃情報
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// レア度
///
/// 既知の値は大文字小文字を区別せずに解釈し、未知の値はそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Other(String),
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Other(raw) => raw,
        }
    }

    /// バッジ表示用のCSSクラス
    pub fn badge_class(&self) -> &'static str {
        match self {
            Rarity::Common => "rarity-badge rarity-common",
            Rarity::Uncommon => "rarity-badge rarity-uncommon",
            Rarity::Rare => "rarity-badge rarity-rare",
            Rarity::Epic => "rarity-badge rarity-epic",
            Rarity::Legendary => "rarity-badge rarity-legendary",
            Rarity::Other(_) => "rarity-badge rarity-unknown",
        }
    }
}

impl From<String> for Rarity {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            _ => Rarity::Other(raw),
        }
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        rarity.as_str().to_string()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ダイビングセンター
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivingCenter {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DivingCenter {
    /// 地図検索リンク
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/{},{}",
            self.latitude, self.longitude
        )
    }
}
