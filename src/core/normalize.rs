const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW: &str = "www.";

/// Reduce user input to a bare host: lowercase, no scheme, no `www.`, no path.
///
/// Prefixes are stripped until none remain so the result is a fixed point.
pub fn normalize_domain(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut rest = lowered.as_str();

    loop {
        let before = rest.len();
        for scheme in SCHEMES {
            if let Some(stripped) = rest.strip_prefix(scheme) {
                rest = stripped;
            }
        }
        if let Some(stripped) = rest.strip_prefix(WWW) {
            rest = stripped;
        }
        if rest.len() == before {
            break;
        }
    }

    match rest.find('/') {
        Some(slash) => rest[..slash].to_string(),
        None => rest.to_string(),
    }
}
