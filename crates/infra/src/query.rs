use serde_json::Value;

/// Appends `?` and one `key=value&` pair per present parameter to `base`.
///
/// Falsy values (`null`, `false`, `0`, `""`) are skipped entirely. Arrays
/// repeat the key once per element in element order. An empty array counts
/// as absent: no bare `key=` pair is sent for it, even though a plain
/// truthiness check would keep it. The result always ends with a separator, so a mapping with no
/// present parameters yields `{base}?`.
///
/// Values are written verbatim; escaping happens in [`crate::HttpClient`].
pub fn build_query_url<'a, K, I>(base: &str, params: I) -> String
where
    K: AsRef<str> + 'a,
    I: IntoIterator<Item = (K, &'a Value)>,
{
    let mut url = format!("{base}?");
    for (key, value) in params {
        let key = key.as_ref();
        if is_falsy(value) {
            continue;
        }
        match value {
            Value::Array(items) => {
                for item in items {
                    push_pair(&mut url, key, item);
                }
            }
            other => push_pair(&mut url, key, other),
        }
    }
    url
}

fn push_pair(url: &mut String, key: &str, value: &Value) {
    url.push_str(key);
    url.push('=');
    url.push_str(&render(value));
    url.push('&');
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // nested structures have no canonical query form; send them as JSON
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}
