use crate::core::flatten::flatten_response;
use crate::core::normalize::normalize_domain;
use crate::domain::model::DomainResult;
use crate::domain::ports::DomainLookup;

/// Split a comma-separated list into normalized domains, keeping order and duplicates.
pub fn split_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let domain = normalize_domain(entry);
            if domain.is_empty() {
                tracing::debug!("🔶 Skipping '{}': nothing left after normalization", entry);
                None
            } else {
                Some(domain)
            }
        })
        .collect()
}

/// Query each domain in turn and collect the flattened records.
pub async fn resolve_batch<L>(lookup: &mut L, domains: &[String]) -> Vec<DomainResult>
where
    L: DomainLookup + ?Sized,
{
    let mut results = Vec::new();

    for (index, domain) in domains.iter().enumerate() {
        tracing::debug!("📡 Domain {}/{}: {}", index + 1, domains.len(), domain);
        let response = lookup.lookup(domain).await;
        let records = flatten_response(domain, response.as_ref());

        if let Some(first) = records.first().filter(|r| r.is_error()) {
            tracing::info!("🔶 {}: {:?}", domain, first);
        } else {
            tracing::debug!("✅ {}: {} seller records", domain, records.len());
        }
        results.extend(records);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct RecordingLookup {
        seen: Vec<String>,
        reply: Option<Value>,
    }

    #[async_trait]
    impl DomainLookup for RecordingLookup {
        async fn lookup(&mut self, domain: &str) -> Option<Value> {
            self.seen.push(domain.to_string());
            self.reply.clone()
        }
    }

    #[test]
    fn test_split_drops_blank_entries() {
        assert_eq!(split_domains("a.com, ,b.com"), vec!["a.com", "b.com"]);
        assert_eq!(split_domains(" , ,"), Vec::<String>::new());
        assert_eq!(split_domains(""), Vec::<String>::new());
    }

    #[test]
    fn test_split_normalizes_and_keeps_duplicates() {
        assert_eq!(
            split_domains("https://www.A.com/x, a.com ,http://,B.com"),
            vec!["a.com", "a.com", "b.com"]
        );
    }

    #[tokio::test]
    async fn test_one_query_per_domain_in_order() {
        let mut lookup = RecordingLookup {
            seen: Vec::new(),
            reply: None,
        };
        let domains = split_domains("a.com, ,b.com");
        let results = resolve_batch(&mut lookup, &domains).await;

        assert_eq!(lookup.seen, vec!["a.com", "b.com"]);
        assert_eq!(
            results,
            vec![DomainResult::failed("a.com"), DomainResult::failed("b.com")]
        );
    }

    #[tokio::test]
    async fn test_records_are_concatenated() {
        let mut lookup = RecordingLookup {
            seen: Vec::new(),
            reply: Some(json!({
                "sellers": [[{"contacts": "c", "price": 1, "date": "d"}]],
                "data": []
            })),
        };
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        let results = resolve_batch(&mut lookup, &domains).await;

        let labels: Vec<Option<&str>> = results.iter().map(DomainResult::domain).collect();
        assert_eq!(labels, vec![Some("a.com"), Some("b.com")]);
    }
}
