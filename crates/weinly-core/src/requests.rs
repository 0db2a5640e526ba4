/// Request archive: stores each analyzed request (user input, raw model
/// output, normalized spec) in Redis with a TTL, plus a capped index of the
/// most recent request ids.
///
/// The archive is a fire-and-forget sink. Every operation degrades
/// gracefully through `RedisCache`; a failed store never affects the
/// response the user already received.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::redis::RedisCache;
use crate::spec::FabricSpecification;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const RECENT_INDEX_KEY: &str = "weinly:requests:recent";
const RECENT_INDEX_CAP: usize = 100;

pub type RequestId = String;

/// One archived analyze request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRequest {
    pub id: RequestId,
    /// The free-text fabric description the user submitted.
    pub user_input: String,
    /// The model's output as parsed, before normalization.
    pub model_output: serde_json::Value,
    pub spec: FabricSpecification,
    /// Unix timestamp in seconds.
    pub created_at: u64,
}

impl StoredRequest {
    pub fn new(
        user_input: String,
        model_output: serde_json::Value,
        spec: FabricSpecification,
    ) -> Self {
        Self {
            id: new_request_id(),
            user_input,
            model_output,
            spec,
            created_at: unix_now_secs(),
        }
    }
}

pub struct RequestArchive {
    redis: RedisCache,
    ttl_secs: u64,
}

impl RequestArchive {
    pub fn new(redis: RedisCache, ttl_secs: u64) -> Self {
        Self { redis, ttl_secs }
    }

    pub async fn is_available(&self) -> bool {
        self.redis.is_available().await
    }

    /// Persist a request and index its id. Returns `true` only if the record
    /// itself was written; an index failure alone is not a store failure.
    pub async fn store(&self, request: &StoredRequest) -> bool {
        let Ok(raw) = serde_json::to_string(request) else {
            return false;
        };
        if !self
            .redis
            .set_with_ttl(&request_key(&request.id), &raw, self.ttl_secs)
            .await
        {
            return false;
        }
        let _ = self
            .redis
            .lpush_capped(RECENT_INDEX_KEY, &request.id, RECENT_INDEX_CAP)
            .await;
        true
    }

    pub async fn get(&self, id: &str) -> Option<StoredRequest> {
        let raw = self.redis.get(&request_key(id)).await?;
        serde_json::from_str::<StoredRequest>(&raw).ok()
    }

    /// The most recent request ids, newest first. Expired requests may still
    /// appear here; `get` resolves them to `None`.
    pub async fn recent_ids(&self, limit: usize) -> Vec<RequestId> {
        self.redis
            .lrange(RECENT_INDEX_KEY, limit.min(RECENT_INDEX_CAP))
            .await
            .unwrap_or_default()
    }
}

fn request_key(id: &str) -> String {
    format!("weinly:request:{id}")
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs()
}

fn new_request_id() -> RequestId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();

    let mut h = Sha256::new();
    h.update(now.as_nanos().to_le_bytes());
    h.update(pid.to_le_bytes());
    h.update(counter.to_le_bytes());
    let digest = h.finalize();
    hex_lower(&digest[..16])
}

fn hex_lower(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_ids_are_hex_and_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn stored_request_round_trips_through_json() {
        let spec = crate::spec::normalize(&json!({"fabric_type": "denim"}));
        let request = StoredRequest::new(
            "denim for jackets".to_string(),
            json!({"fabric_type": "denim"}),
            spec,
        );
        let raw = serde_json::to_string(&request).expect("serialize");
        let parsed: StoredRequest = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed.id, request.id);
        assert_eq!(parsed.user_input, request.user_input);
        assert_eq!(parsed.spec, request.spec);
    }
}
