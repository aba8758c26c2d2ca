use crate::config::UpstreamConfig;
use crate::core::batch::{resolve_batch, split_domains};
use crate::core::session::UpstreamSession;
use crate::domain::model::DomainResult;
use crate::utils::error::Result;

/// Runs one batch end to end with a fresh upstream session.
pub struct RelayEngine {
    upstream: UpstreamConfig,
}

impl RelayEngine {
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self { upstream }
    }

    pub async fn run(&self, raw_domains: &str) -> Result<Vec<DomainResult>> {
        let domains = split_domains(raw_domains);
        if domains.is_empty() {
            tracing::info!("🔶 Empty batch, nothing to query");
            return Ok(Vec::new());
        }

        tracing::info!("📥 Resolving {} domains", domains.len());
        let mut session = UpstreamSession::open(&self.upstream)?;

        // 取不到 token 也照常查詢
        if let Err(e) = session.refresh_token().await {
            tracing::warn!("🔶 Token fetch failed, continuing without one: {}", e);
        }

        let results = resolve_batch(&mut session, &domains).await;
        tracing::info!(
            "✅ Batch done: {} domains, {} records",
            domains.len(),
            results.len()
        );
        Ok(results)
    }
}
