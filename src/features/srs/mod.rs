pub mod engine;
pub mod error;
pub mod error_conversions;
pub mod selector;
pub mod service;
pub mod stats;

pub use engine::{MemoryState, Quality, Schedule, compute};
pub use error::ReviewError;
pub use service::ReviewService;
