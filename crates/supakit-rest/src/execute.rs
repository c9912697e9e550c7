use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use url::Url;

use supakit_core::{SupabaseClient, SupabaseError, SupabaseResponse};

use crate::filter::render_filter_value;
use crate::parts::{Operation, RequestParts};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Execute a PostgREST request and parse the response.
pub async fn execute_rest<T: DeserializeOwned>(
    client: &SupabaseClient,
    parts: &RequestParts,
) -> SupabaseResponse<T> {
    if let Some(msg) = &parts.invalid {
        return SupabaseResponse::error(SupabaseError::query_builder(msg.clone()));
    }

    let url = build_url(client, parts);
    let headers = match build_headers(client, parts).await {
        Ok(h) => h,
        Err(e) => return SupabaseResponse::error(e),
    };
    let method = parts.operation.method();

    tracing::debug!(
        method = %method,
        url = %url,
        "Executing PostgREST request"
    );

    let mut request = client.http().request(method, url).headers(headers);
    if let Some(body) = &parts.body {
        request = request.json(body);
    }

    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => return SupabaseResponse::error(SupabaseError::Http(e.to_string())),
    };

    let status_code = response.status().as_u16();
    let body_text = match response.text().await {
        Ok(t) => t,
        Err(e) => return SupabaseResponse::error(SupabaseError::Http(e.to_string())),
    };

    if status_code >= 400 {
        return parse_error_response(status_code, &body_text);
    }

    if status_code == 204 || body_text.trim().is_empty() {
        return SupabaseResponse::no_content();
    }

    let parsed = if parts.single {
        serde_json::from_str::<T>(&body_text).map(|item| vec![item])
    } else if parts.operation == Operation::Select {
        serde_json::from_str::<Vec<T>>(&body_text)
    } else {
        serde_json::from_str::<Vec<T>>(&body_text)
            // A write without `single` may still come back as one object.
            .or_else(|_| serde_json::from_str::<T>(&body_text).map(|item| vec![item]))
    };

    match parsed {
        Ok(data) => build_response_from_operation(data, parts),
        Err(e) => SupabaseResponse::error(SupabaseError::Serialization(format!(
            "Failed to parse response: {}",
            e
        ))),
    }
}

/// Build `/rest/v1/{table}?select=...&col=eq.val...`.
pub fn build_url(client: &SupabaseClient, parts: &RequestParts) -> Url {
    let mut url = client.endpoint("/rest/v1", &format!("/{}", parts.table));
    {
        let mut query = url.query_pairs_mut();
        let wants_columns = parts.operation == Operation::Select || parts.returning;
        if wants_columns {
            if let Some(columns) = &parts.select_columns {
                query.append_pair("select", columns);
            }
        }
        for filter in &parts.filters {
            query.append_pair(&filter.column, &render_filter_value(&filter.value));
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

async fn build_headers(
    client: &SupabaseClient,
    parts: &RequestParts,
) -> Result<HeaderMap, SupabaseError> {
    let mut headers = HeaderMap::new();

    let bearer = client.bearer_token().await;
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|e| SupabaseError::config(format!("Invalid bearer token: {}", e)))?,
    );

    let schema = client.schema();
    if schema != "public" {
        let profile = HeaderValue::from_str(schema)
            .map_err(|e| SupabaseError::config(format!("Invalid schema name: {}", e)))?;
        match parts.operation {
            Operation::Select => headers.insert("Accept-Profile", profile),
            _ => headers.insert("Content-Profile", profile),
        };
    }

    let accept = if parts.single {
        SINGLE_OBJECT
    } else {
        "application/json"
    };
    headers.insert(ACCEPT, HeaderValue::from_static(accept));

    if parts.operation != Operation::Select {
        let prefer = if parts.returning {
            "return=representation"
        } else {
            "return=minimal"
        };
        headers.insert("Prefer", HeaderValue::from_static(prefer));
    }

    Ok(headers)
}

fn build_response_from_operation<T>(data: Vec<T>, parts: &RequestParts) -> SupabaseResponse<T> {
    match parts.operation {
        Operation::Insert => SupabaseResponse::created(data),
        _ => SupabaseResponse::ok(data),
    }
}

fn parse_error_response<T>(status_code: u16, body: &str) -> SupabaseResponse<T> {
    // PostgREST error format: { "message": "...", "code": "...", "details": "...", "hint": "..." }
    let err = match serde_json::from_str::<JsonValue>(body) {
        Ok(error_obj) if error_obj.is_object() => {
            let field = |name: &str| {
                error_obj
                    .get(name)
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
            };
            SupabaseError::Postgrest {
                status: status_code,
                message: field("message").unwrap_or_else(|| "Unknown error".to_string()),
                code: field("code"),
                details: field("details"),
                hint: field("hint"),
            }
        }
        _ if body.trim().is_empty() => {
            SupabaseError::postgrest(status_code, format!("HTTP {}", status_code), None)
        }
        _ => SupabaseError::postgrest(status_code, body.to_string(), None),
    };
    if status_code >= 500 {
        tracing::warn!(status = status_code, "PostgREST server error");
    }
    SupabaseResponse::error(err)
}
