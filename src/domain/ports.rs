use async_trait::async_trait;
use serde_json::Value;

/// Source of raw upstream responses, one domain at a time.
///
/// `None` means the query failed in transport or the body was not JSON.
#[async_trait]
pub trait DomainLookup: Send {
    async fn lookup(&mut self, domain: &str) -> Option<Value>;
}
