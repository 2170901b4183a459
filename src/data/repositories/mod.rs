pub mod item_stats;
pub mod review_status;
pub mod word;

pub use item_stats::ItemStatsRepository;
pub use review_status::ReviewStatusRepository;
pub use word::WordRepository;
