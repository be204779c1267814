use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Context;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::BackendConfig;
use crate::odoo::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Service-account logins attempted per client before giving up.
pub const MAX_AUTH_ATTEMPTS: u32 = 2;

const AUTH_TIMEOUT: Duration = Duration::from_secs(10);
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct ServiceSession {
    uid: Option<u64>,
    attempts: u32,
}

/// JSON-RPC client for one Odoo database, authenticated as the shop's
/// service account.
pub struct OdooClient {
    http: reqwest::Client,
    base_url: String,
    db: String,
    username: String,
    password: String,
    session: Mutex<ServiceSession>,
    next_id: AtomicU64,
}

impl OdooClient {
    pub fn new(base_url: &str, db: &str, username: &str, password: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("AlSaji-Website/1.0")
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            db: db.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            session: Mutex::new(ServiceSession::default()),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        if config.odoo_url.is_empty() {
            anyhow::bail!("ODOO_URL is not set");
        }
        Self::new(&config.odoo_url, &config.odoo_db, &config.odoo_username, &config.odoo_password)
    }

    pub fn db(&self) -> &str {
        &self.db
    }

    pub fn jsonrpc_url(&self) -> String {
        format!("{}/jsonrpc", self.base_url)
    }

    /// One `call` round trip. JSON-RPC errors come back as [`OdooRpcError`](crate::odoo::jsonrpc::OdooRpcError).
    pub async fn call(&self, service: &str, method: &str, args: Vec<Value>, timeout: Duration) -> anyhow::Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::call(service, method, args, id);
        let response = self
            .http
            .post(self.jsonrpc_url())
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("odoo {service}.{method}: request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("odoo {service}.{method}: HTTP {status}: {body}");
        }
        let response: JsonRpcResponse = response
            .json()
            .await
            .with_context(|| format!("odoo {service}.{method}: invalid JSON-RPC response"))?;
        Ok(response.into_result()?)
    }

    /// `common.login`. Odoo answers `false` for bad credentials.
    pub async fn login(&self, login: &str, password: &str) -> anyhow::Result<Option<u64>> {
        let result = self
            .call("common", "login", vec![json!(self.db), json!(login), json!(password)], AUTH_TIMEOUT)
            .await?;
        Ok(result.as_u64().filter(|uid| *uid > 0))
    }

    pub async fn logout(&self, uid: u64) -> anyhow::Result<()> {
        self.call("common", "logout", vec![json!(self.db), json!(uid)], AUTH_TIMEOUT).await?;
        Ok(())
    }

    /// Service-account uid, logging in on first use.
    ///
    /// The session lock is held across the login so concurrent callers wait
    /// for one attempt instead of starting their own.
    async fn service_uid(&self) -> anyhow::Result<u64> {
        let mut session = self.session.lock().await;
        if let Some(uid) = session.uid {
            return Ok(uid);
        }
        if self.username.is_empty() || self.password.is_empty() {
            anyhow::bail!("odoo service account is not configured");
        }
        if session.attempts >= MAX_AUTH_ATTEMPTS {
            anyhow::bail!("odoo authentication gave up after {} attempts", session.attempts);
        }
        session.attempts += 1;
        match self.login(&self.username, &self.password).await {
            Ok(Some(uid)) => {
                info!("authenticated with odoo as uid {uid}");
                session.uid = Some(uid);
                Ok(uid)
            }
            Ok(None) => {
                warn!("odoo rejected the service account credentials");
                anyhow::bail!("odoo authentication failed")
            }
            Err(e) => {
                warn!("odoo authentication error: {e:#}");
                Err(e)
            }
        }
    }

    /// `object.execute_kw` as the service account.
    pub async fn execute_kw(&self, model: &str, method: &str, args: Vec<Value>, kwargs: Value) -> anyhow::Result<Value> {
        let uid = self.service_uid().await?;
        let args = vec![
            json!(self.db),
            json!(uid),
            json!(self.password),
            json!(model),
            json!(method),
            Value::Array(args),
            kwargs,
        ];
        self.call("object", "execute_kw", args, CALL_TIMEOUT).await
    }
}
