//! Caching layer.
//!
//! This module provides a cache abstraction with a Redis implementation.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::RedisCacheService;
