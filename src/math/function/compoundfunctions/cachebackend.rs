use std::collections::HashMap;
use std::sync::{
    PoisonError,
    RwLock
};

use tracing::debug;

use crate::math::domain::{
    Domain,
    MAX_DIMS
};
use crate::math::point::Point;
use crate::units::value::Value;

/// Bit pattern of a point, usable as a hash key.
pub type PointKey = [u64; MAX_DIMS];

pub fn point_key<D: Domain>(p: &Point<D>) -> PointKey {
    p.raw().map(f64::to_bits)
}

/// Point to value table shared between threads, cleared as a whole once it
/// grows past `limit` entries.
///
/// Two threads may both miss the same key and compute it twice; values are
/// deterministic, so the second insert only overwrites an equal value.
pub struct RwLockBackend<R: Value> {
    limit: usize,
    cache: RwLock<HashMap<PointKey, R>>
}

impl<R: Value> RwLockBackend<R> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            cache: RwLock::new(HashMap::new())
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_or_compute(&self, key: PointKey, compute: impl FnOnce() -> R) -> R {
        if let Some(&value) = self.cache.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return value;
        }

        // computed outside the lock
        let value = compute();
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(key, value);
        if cache.len() > self.limit {
            debug!(entries = cache.len(), limit = self.limit, "memoization cache full, clearing");
            cache.clear();
        }
        value
    }
}
