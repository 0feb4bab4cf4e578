//! Fishy Dex Common Library
//!
//! CLIとWeb(WASM)で共有される型とビューロジック

pub mod api;
pub mod card;
pub mod catalog;
pub mod directory;
pub mod error;
pub mod format;
pub mod store;
pub mod tracker;
pub mod types;

pub use api::{session_present, Endpoints, LastSeenUpdate, DEFAULT_API_BASE_URL, LOGIN_ROUTE};
pub use card::{CardState, SeenState, Toggle, ACKNOWLEDGEMENT_DURATION};
pub use catalog::{filter_fishes, Catalog, CatalogStats, FilterMode};
pub use directory::{directory_footer, filter_centers, DirectorySort};
pub use error::{Error, Result};
pub use format::{format_coordinate, format_last_seen, format_relative};
pub use store::{
    Broadcaster, ChangeNotifier, KeyValueStore, MemoryStore, SeenSet, SeenStore, SEEN_STORE_KEY,
};
pub use tracker::{PanelSplit, Tracker, LIST_PANEL_MIN, MAP_PANEL_MIN, PANEL_SPLIT_KEY};
pub use types::{DivingCenter, Fish, Rarity, Sighting};
