use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::export::RawCatalog;

/// Products requested per page from the website API.
pub const PRODUCT_PAGE_SIZE: usize = 1000;

const SESSION_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<RawCatalog>;
}

/// The `/api/alsaji/*` JSON endpoints of the Odoo website module.
pub struct OdooRestSource {
    http: reqwest::Client,
    base_url: String,
    db: String,
}

impl OdooRestSource {
    pub fn new(base_url: &str, db: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent("AlSaji-Website/1.0")
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), db: db.to_string() })
    }

    /// Visit `/web?db=` once so Odoo binds the session cookie to the database.
    async fn open_session(&self) {
        let url = format!("{}/web", self.base_url);
        match self.http.get(&url).query(&[("db", &self.db)]).timeout(SESSION_TIMEOUT).send().await {
            Ok(response) => info!("odoo session initialization: {}", response.status()),
            Err(e) => warn!("odoo session initialization failed: {e}"),
        }
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {endpoint} failed"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {endpoint}: HTTP {status}");
        }
        response.json().await.with_context(|| format!("GET {endpoint}: invalid JSON"))
    }

    /// A list endpoint; failures read as an empty list like a missing module would.
    async fn get_list(&self, endpoint: &str) -> Value {
        match self.get_json(endpoint, &[]).await {
            Ok(value) => value,
            Err(e) => {
                warn!("{e:#}");
                Value::Array(Vec::new())
            }
        }
    }

    async fn fetch_products(&self) -> anyhow::Result<Vec<Value>> {
        let mut products = Vec::new();
        let mut page = 1;
        loop {
            let query = [
                ("page", page.to_string()),
                ("limit", PRODUCT_PAGE_SIZE.to_string()),
                ("offset", products.len().to_string()),
            ];
            let data = self.get_json("/api/alsaji/products", &query).await?;
            let batch = match data.get("products").and_then(Value::as_array) {
                Some(batch) if !batch.is_empty() => batch.clone(),
                _ => break,
            };
            info!("fetched page {page} with {} products", batch.len());
            let last_page = batch.len() < PRODUCT_PAGE_SIZE;
            products.extend(batch);
            if last_page {
                break;
            }
            page += 1;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(products)
    }
}

#[async_trait]
impl CatalogSource for OdooRestSource {
    async fn fetch(&self) -> anyhow::Result<RawCatalog> {
        self.open_session().await;
        let products = self.fetch_products().await?;
        info!("total products fetched: {}", products.len());
        let (categories, brands, branches) = futures::join!(
            self.get_list("/api/alsaji/categories"),
            self.get_list("/api/alsaji/brands"),
            self.get_list("/api/alsaji/branches"),
        );
        Ok(RawCatalog { products, categories, brands, branches })
    }
}
