use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anti-forgery token for the upstream search API. Opaque; expires server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a token was found on the upstream homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    FormField,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultError {
    #[serde(rename = "Failed to fetch data")]
    FetchFailed,
    #[serde(rename = "No sellers found")]
    NoSellers,
}

/// One row of the relay's output. Field names match the public JSON.
///
/// A seller's `domain` is `None` when the upstream row has no `Domain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainResult {
    Seller {
        domain: Option<String>,
        contact: Value,
        price: Value,
        date: Value,
    },
    Error {
        domain: String,
        error: ResultError,
    },
}

impl DomainResult {
    pub fn failed(domain: &str) -> Self {
        DomainResult::Error {
            domain: domain.to_string(),
            error: ResultError::FetchFailed,
        }
    }

    pub fn no_sellers(domain: &str) -> Self {
        DomainResult::Error {
            domain: domain.to_string(),
            error: ResultError::NoSellers,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            DomainResult::Seller { domain, .. } => domain.as_deref(),
            DomainResult::Error { domain, .. } => Some(domain),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DomainResult::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_records_serialize_to_public_shape() {
        let value = serde_json::to_value(DomainResult::failed("a.com")).unwrap();
        assert_eq!(value, json!({"domain": "a.com", "error": "Failed to fetch data"}));

        let value = serde_json::to_value(DomainResult::no_sellers("b.com")).unwrap();
        assert_eq!(value, json!({"domain": "b.com", "error": "No sellers found"}));
    }

    #[test]
    fn test_seller_record_keeps_null_fields() {
        let record = DomainResult::Seller {
            domain: Some("example.com".to_string()),
            contact: Value::Null,
            price: json!(50),
            date: Value::Null,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"domain": "example.com", "contact": null, "price": 50, "date": null})
        );
        assert!(!record.is_error());
    }
}
