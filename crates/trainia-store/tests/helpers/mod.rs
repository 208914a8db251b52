#![allow(dead_code)]

pub mod fixtures;
pub mod gateways;

use std::num::NonZeroUsize;
use std::sync::Arc;

use trainia_cache::TtlCache;

pub fn test_cache() -> Arc<TtlCache> {
    Arc::new(TtlCache::new(NonZeroUsize::new(64).unwrap()))
}
