// src/lib.rs

//! Loipencheck: cross-country trail status aggregator

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
