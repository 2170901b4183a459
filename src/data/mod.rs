pub mod db;
pub mod migrations;
pub mod models;
pub mod repositories;

pub use db::{DbPool, init_pool};
