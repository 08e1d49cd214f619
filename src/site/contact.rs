/// Builds the mailto URL the contact form opens: `action?name=value&...`.
///
/// Values are escaped the way JavaScript's `encodeURIComponent` does; names are
/// passed through.
pub fn build_mailto(action: &str, fields: &[(String, String)]) -> String {
    let params: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, encode_uri_component(value)))
        .collect();
    format!("{}?{}", action, params.join("&"))
}

/// Parses `name=value&name=value` as typed on the command line. Values are taken literally.
pub fn parse_fields(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), value.to_string()),
            None => (pair.trim().to_string(), String::new()),
        })
        .collect()
}

pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
