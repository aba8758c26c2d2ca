use crate::domain::model::Token;
use scraper::{Html, Selector};

pub const TOKEN_FIELD: &str = "_token";
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Value of the first `<input name="_token">` in the page, if it carries one.
pub fn extract_form_token(html: &str) -> Option<Token> {
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, TOKEN_FIELD)).ok()?;
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(Token::new)
}

/// Look up one cookie in a `Cookie:` style header value (`a=1; b=2`).
///
/// The value is returned as stored, without percent-decoding.
pub fn cookie_value(header: &str, name: &str) -> Option<Token> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(Token::new)
}
