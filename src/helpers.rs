use crate::error::{Error, Result};
use crate::types::{HttpClient, Parameters};
use reqwest::header;
use reqwest_middleware::ClientBuilder;
use serde_json::Value;

/// Default origin for API requests.
pub const API_URL: &str = "https://onesignal.com/api/v1";
/// User agent for requests.
pub const USER_AGENT_STRING: &str = concat!("onesignal-client-rust/", env!("CARGO_PKG_VERSION"));

/// Builds the default client. No retry middleware is attached; every call is attempted once.
pub fn get_default_client(
    user_agent_string: &'static str,
    accept_invalid_certs: bool,
) -> Result<HttpClient> {
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

/// Checks the status and decodes a successful body. An empty body decodes to `null`.
pub fn parses_response(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<Value> {
    if !status.is_success() {
        let body = String::from_utf8_lossy(body).into_owned();

        log::warn!("Request failed with status {status}: {body}");
        return Err(Error::Http { status, body });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice::<Value>(body)?)
}

/// Whether a parameter counts as absent: missing, `null`, `false`, `0`, an empty string,
/// an empty array or an empty object.
pub fn is_empty_param(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

/// Whether a parameter is a number, or a string holding a decimal number such as `"1"` or
/// `" 2.5"`.
pub fn is_numeric_param(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let s = s.trim();
            // f64 parsing also accepts "inf" and "nan"
            let has_only_number_chars = s.chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));

            has_only_number_chars
                && s.chars().any(|c| c.is_ascii_digit())
                && s.parse::<f64>().is_ok()
        },
        _ => false,
    }
}

/// Merges `defaults` over `parameters`. Defaults win on key collisions.
pub fn merge_defaults(
    mut parameters: Parameters,
    defaults: &Parameters,
) -> Parameters {
    for (key, value) in defaults {
        parameters.insert(key.clone(), value.clone());
    }

    parameters
}
