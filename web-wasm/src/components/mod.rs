pub mod diving_centers;
pub mod fish_card;
pub mod fish_catalog;
pub mod fish_tracker;
pub mod nav_header;
