//! Fishy Dex CLI
//!
//! カタログ・トラッカー・ダイビングセンターをターミナルで閲覧する。

pub mod actions;
pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod storage;
