pub mod auth;
pub mod config;
pub mod network;
pub mod storage;
