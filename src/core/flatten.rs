use crate::domain::model::DomainResult;
use serde_json::Value;

/// Turn one upstream search response into relay records.
///
/// `sellers[i]` is paired with `data[i]`; when `data` is shorter, the queried
/// domain labels the group. A row without a string `Domain` labels it `null`.
pub fn flatten_response(domain: &str, response: Option<&Value>) -> Vec<DomainResult> {
    let Some(body) = response
        .and_then(Value::as_object)
        .filter(|body| !body.is_empty())
    else {
        return vec![DomainResult::failed(domain)];
    };

    let seller_groups = body
        .get("sellers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if seller_groups.is_empty() {
        return vec![DomainResult::no_sellers(domain)];
    }

    let rows = body
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if rows.len() != seller_groups.len() {
        tracing::debug!(
            "🔶 {}: {} seller groups but {} data rows",
            domain,
            seller_groups.len(),
            rows.len()
        );
    }

    let mut results = Vec::new();
    for (index, group) in seller_groups.iter().enumerate() {
        let label = match rows.get(index) {
            Some(row) => row.get("Domain").and_then(Value::as_str),
            None => Some(domain),
        };

        let Some(sellers) = group.as_array() else {
            tracing::debug!("🔶 {}: seller group {} is not a list", domain, index);
            continue;
        };

        for seller in sellers {
            results.push(DomainResult::Seller {
                domain: label.map(str::to_string),
                contact: field(seller, "contacts"),
                price: field(seller, "price"),
                date: field(seller, "date"),
            });
        }
    }

    results
}

fn field(seller: &Value, key: &str) -> Value {
    seller.get(key).cloned().unwrap_or(Value::Null)
}
