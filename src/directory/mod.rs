//! Client for the external Order Directory API: fetchers, normalized
//! models, and pagination-link handling.

pub mod client;
pub mod models;
pub mod pagination;

pub use client::{DirectoryApi, DirectoryError, HttpDirectory};
