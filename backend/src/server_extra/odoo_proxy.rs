//! `POST /proxy`: relays browser JSON-RPC calls to Odoo's `/jsonrpc`.

use std::time::Duration;

use anyhow::Context;
use axum::body::Body;
use bytes::Bytes;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::config::get_backend_config;

pub const PROXY_ROUTE: &str = "/proxy";

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub enum ProxyRejection {
    MethodNotAllowed,
    EmptyBody,
    InvalidJson(String),
}

impl ProxyRejection {
    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::EmptyBody | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::EmptyBody => "No data received".to_string(),
            Self::InvalidJson(e) => format!("Invalid JSON: {e}"),
        }
    }
}

/// Check the request before anything is sent upstream.
pub fn validate_proxy_request(method: &Method, body: &[u8]) -> Result<Value, ProxyRejection> {
    if method != Method::POST {
        return Err(ProxyRejection::MethodNotAllowed);
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ProxyRejection::EmptyBody);
    }
    serde_json::from_slice(body).map_err(|e| ProxyRejection::InvalidJson(e.to_string()))
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST, OPTIONS"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, X-Requested-With, Authorization"),
    );
    response
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
}

async fn _forward(payload: Value) -> anyhow::Result<Response> {
    let config = get_backend_config();
    if config.odoo_url.is_empty() {
        anyhow::bail!("ODOO_URL is not configured");
    }
    let url = format!("{}/jsonrpc", config.odoo_url);
    info!("proxying json-rpc call to {url}");

    let upstream = reqwest::Client::new()
        .post(&url)
        .header(reqwest::header::USER_AGENT, "AlSaji-Website/1.0")
        .timeout(UPSTREAM_TIMEOUT)
        .json(&payload)
        .send()
        .await
        .context("upstream request failed")?;
    let status = StatusCode::from_u16(upstream.status().as_u16()).context("invalid upstream status")?;
    let body = upstream.bytes().await.context("failed to read upstream body")?;

    Ok((status, [(header::CONTENT_TYPE, "application/json")], Body::from(body)).into_response())
}

pub async fn odoo_proxy(method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return with_cors(StatusCode::OK.into_response());
    }
    let payload = match validate_proxy_request(&method, &body) {
        Ok(payload) => payload,
        Err(rejection) => return with_cors(json_response(rejection.status(), json!({"error": rejection.message()}))),
    };
    match _forward(payload).await {
        Ok(response) => with_cors(response),
        Err(e) => {
            error!("odoo_proxy: request failed: {:#}", e);
            with_cors(json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Proxy request failed", "details": format!("{e:#}")}),
            ))
        }
    }
}
