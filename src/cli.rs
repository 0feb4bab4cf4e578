use clap::{Parser, Subcommand};
use fishy_dex_common::{DirectorySort, FilterMode};

#[derive(Parser)]
#[command(name = "fishy-dex")]
#[command(about = "Fishy Dex - 魚の目撃トラッカー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 魚のカタログを表示
    Catalog {
        /// 既見フィルタ (all/seen/unseen)
        #[arg(short, long, default_value = "all")]
        filter: FilterMode,

        /// 名前で検索
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// 魚の既見/未見を切り替える
    Toggle {
        /// 魚のID
        #[arg(required = true)]
        id: String,
    },

    /// 最新の目撃順に魚を表示
    Tracker,

    /// ダイビングセンターを表示
    Centers {
        /// 名前または住所で検索
        #[arg(short, long, default_value = "")]
        search: String,

        /// 並べ替えキー (name)
        #[arg(long, default_value = "name")]
        sort: DirectorySort,
    },

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        api_url: Option<String>,

        /// セッショントークンを設定
        #[arg(long)]
        session_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
