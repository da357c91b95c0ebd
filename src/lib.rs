pub mod config;
pub mod db;
pub mod deck;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod templates_structs;
