//! In-memory memoization of analysis results
//!
//! Keys are the SHA-256 of the serialized request, so any change to the
//! resume, job description, industry, profile or prediction is a miss.

use crate::config::CacheConfig;
use crate::error::{AtsScorerError, Result};
use crate::processing::analyzer::{AnalysisRequest, AnalysisResult};
use moka::sync::Cache;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

pub struct AnalysisCache {
    entries: Cache<String, AnalysisResult>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity.max(1) as u64)
            .time_to_live(ttl)
            .build();

        Self {
            entries,
            hits: 0,
            misses: 0,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_seconds), config.capacity)
    }

    /// Live entries, after pending evictions have been applied.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Return the cached result for `request`, computing and storing it on a miss.
    /// Errors are returned to the caller and never cached.
    pub fn get_or_compute<F>(&mut self, request: &AnalysisRequest, compute: F) -> Result<AnalysisResult>
    where
        F: FnOnce(&AnalysisRequest) -> Result<AnalysisResult>,
    {
        let key = cache_key(request)?;
        let mut computed = false;

        let outcome = self.entries.try_get_with(key.clone(), || {
            computed = true;
            compute(request)
        });

        if computed {
            self.misses += 1;
        } else {
            self.hits += 1;
            log::debug!("Analysis cache hit for {}", &key[..12]);
        }

        outcome.map_err(|shared| {
            Arc::try_unwrap(shared)
                .unwrap_or_else(|shared| AtsScorerError::InvalidInput(shared.to_string()))
        })
    }
}

/// Hex SHA-256 of the request's JSON form.
pub fn cache_key(request: &AnalysisRequest) -> Result<String> {
    let json = serde_json::to_string(request)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
