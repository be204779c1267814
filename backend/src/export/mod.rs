//! Static catalog export.
//!
//! Pulls raw products, categories, brands and branches from the Odoo website
//! module, then writes the facet summary, the search index, a combined
//! catalog file and a few static HTML pages. A SHA-256 of the raw data is kept
//! so unchanged exports are skipped.

pub mod filter_data;
pub mod search_index;
pub mod html_pages;
mod source;
pub use source::{CatalogSource, OdooRestSource};

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use common::catalog::CatalogIndex;
use common::lenient::text_of;
use common::render::PriceFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Everything fetched from Odoo for one export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCatalog {
    pub products: Vec<Value>,
    pub categories: Value,
    pub brands: Value,
    pub branches: Value,
}

impl RawCatalog {
    /// SHA-256 of the canonical JSON (object keys sorted at every level).
    pub fn data_hash(&self) -> anyhow::Result<String> {
        let canonical = serde_json::to_string(&canonicalize(serde_json::to_value(self)?))?;
        Ok(sha256::digest(canonical))
    }

    pub fn build_index(&self, exported_at: DateTime<Utc>) -> CatalogIndex {
        CatalogIndex {
            categories: filter_data::facet_counts(&self.products, "category"),
            brands: filter_data::facet_counts(&self.products, "brand"),
            price_ranges: filter_data::price_ranges(&self.products),
            branches: filter_data::branch_counts(&self.products),
            last_updated: Some(exported_at.to_rfc3339()),
            products: search_index::build_search_index(&self.products),
        }
    }
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, canonicalize(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

fn count_of(value: &Value) -> usize {
    value.as_array().map(Vec::len).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_date: String,
    pub total_products: usize,
    pub total_categories: usize,
    pub total_brands: usize,
    pub total_branches: usize,
    pub data_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Unchanged { data_hash: String },
    Written(ExportMetadata),
}

#[derive(Debug, Clone, Serialize)]
struct FilterData<'a> {
    categories: &'a [common::catalog::FacetBucket],
    brands: &'a [common::catalog::FacetBucket],
    price_ranges: &'a [common::catalog::PriceBucket],
    branches: &'a [common::catalog::FacetBucket],
    last_updated: &'a Option<String>,
}

pub struct CatalogExporter {
    output_dir: PathBuf,
    money: PriceFormat,
}

impl CatalogExporter {
    pub fn new(output_dir: impl Into<PathBuf>, money: PriceFormat) -> Self {
        Self { output_dir: output_dir.into(), money }
    }

    pub fn json_dir(&self) -> PathBuf {
        self.output_dir.join("json")
    }

    pub fn html_dir(&self) -> PathBuf {
        self.output_dir.join("html")
    }

    fn hash_file(&self) -> PathBuf {
        self.output_dir.join("data_hash.txt")
    }

    async fn previous_hash(&self) -> Option<String> {
        tokio::fs::read_to_string(self.hash_file()).await.ok().map(|h| h.trim().to_string())
    }

    pub async fn export(&self, raw: &RawCatalog, force: bool, now: DateTime<Utc>) -> anyhow::Result<ExportOutcome> {
        if raw.products.is_empty() {
            anyhow::bail!("no products fetched, nothing to export");
        }
        let data_hash = raw.data_hash()?;
        if !force && self.previous_hash().await.as_deref() == Some(data_hash.as_str()) {
            info!("catalog data unchanged since last export ({data_hash})");
            return Ok(ExportOutcome::Unchanged { data_hash });
        }

        let json_dir = self.json_dir();
        let html_dir = self.html_dir();
        for dir in [&json_dir, &html_dir] {
            tokio::fs::create_dir_all(dir).await.with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let index = raw.build_index(now);
        let filter_data = FilterData {
            categories: &index.categories,
            brands: &index.brands,
            price_ranges: &index.price_ranges,
            branches: &index.branches,
            last_updated: &index.last_updated,
        };

        write_json(&json_dir.join("products.json"), &raw.products).await?;
        write_json(&json_dir.join("categories.json"), &raw.categories).await?;
        write_json(&json_dir.join("brands.json"), &raw.brands).await?;
        write_json(&json_dir.join("branches.json"), &raw.branches).await?;
        write_json(&json_dir.join("filter-data.json"), &filter_data).await?;
        write_json(&json_dir.join("search-index.json"), &index.products).await?;
        write_json(&json_dir.join("catalog.json"), &index).await?;
        write_js_module(&json_dir.join("filter-data.js"), "filterData", &filter_data).await?;
        write_js_module(&json_dir.join("search-index.js"), "searchIndex", &index.products).await?;

        write_text(&html_dir.join("products.html"), &html_pages::products_page(&index.products, &self.money)).await?;
        write_text(&html_dir.join("categories.html"), &html_pages::facet_page("Categories", &index.categories)).await?;
        write_text(&html_dir.join("brands.html"), &html_pages::facet_page("Brands", &index.brands)).await?;
        let product_dir = html_dir.join("products");
        tokio::fs::create_dir_all(&product_dir).await.with_context(|| format!("failed to create {}", product_dir.display()))?;
        for raw_product in &raw.products {
            let product = search_index::index_product(raw_product);
            let html = html_pages::product_page(&product, &text_of(&raw_product["description"]), &self.money);
            write_text(&product_dir.join(html_pages::product_page_file(&product)), &html).await?;
        }

        let metadata = ExportMetadata {
            export_date: now.to_rfc3339(),
            total_products: raw.products.len(),
            total_categories: count_of(&raw.categories),
            total_brands: count_of(&raw.brands),
            total_branches: count_of(&raw.branches),
            data_hash: data_hash.clone(),
        };
        write_json(&self.output_dir.join("metadata.json"), &metadata).await?;
        write_text(&self.hash_file(), &data_hash).await?;

        info!(
            "exported {} products, {} categories, {} brands to {}",
            metadata.total_products,
            index.categories.len(),
            index.brands.len(),
            self.output_dir.display()
        );
        Ok(ExportOutcome::Written(metadata))
    }
}

async fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, text).await.with_context(|| format!("failed to write {}", path.display()))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).with_context(|| format!("failed to encode {}", path.display()))?;
    write_text(path, &text).await
}

/// `window.<name> = <json>;`, loadable with a plain script tag.
async fn write_js_module<T: Serialize + ?Sized>(path: &Path, name: &str, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).with_context(|| format!("failed to encode {}", path.display()))?;
    write_text(path, &format!("window.{name} = {text};")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw() -> RawCatalog {
        RawCatalog {
            products: vec![
                json!({"id": 1, "name": "Oil Filter", "category": "Filtration", "brand": {"name": "Denso"}, "price": 9.5}),
                json!({"id": 2, "name": "Brake Pad", "category": "Brake System", "brand": "AISIN", "price": 38.5, "description": "Front axle"}),
            ],
            categories: json!([{"id": 1, "name": "Filtration"}, {"id": 2, "name": "Brake System"}]),
            brands: json!([]),
            branches: json!([]),
        }
    }

    #[tokio::test]
    async fn writes_every_artifact_and_skips_unchanged_data() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CatalogExporter::new(dir.path(), PriceFormat::default());
        let now = Utc::now();

        let ExportOutcome::Written(metadata) = exporter.export(&raw(), false, now).await.unwrap() else {
            panic!("first export must write");
        };
        assert_eq!((metadata.total_products, metadata.total_categories), (2, 2));

        for file in ["products.json", "filter-data.json", "search-index.json", "catalog.json", "filter-data.js", "search-index.js"] {
            assert!(exporter.json_dir().join(file).exists(), "missing {file}");
        }
        assert!(exporter.html_dir().join("products.html").exists());
        let pad_page = std::fs::read_to_string(exporter.html_dir().join("products/brake-pad-2.html")).unwrap();
        assert!(pad_page.contains("<h1>Brake Pad</h1>"));
        assert!(pad_page.contains("<dd>AISIN</dd>"));
        assert!(pad_page.contains("Front axle"));
        assert!(exporter.html_dir().join("products/oil-filter-1.html").exists());
        assert!(dir.path().join("metadata.json").exists());

        let catalog = std::fs::read_to_string(exporter.json_dir().join("catalog.json")).unwrap();
        let index = CatalogIndex::from_json_str(&catalog).unwrap();
        assert_eq!(index.brands.iter().map(|b| b.slug.as_str()).collect::<Vec<_>>(), vec!["denso", "aisin"]);
        assert_eq!(index.products[1].search_terms[3], Some("Front axle".to_string()));

        let js = std::fs::read_to_string(exporter.json_dir().join("search-index.js")).unwrap();
        assert!(js.starts_with("window.searchIndex = ["));

        assert_eq!(
            exporter.export(&raw(), false, now).await.unwrap(),
            ExportOutcome::Unchanged { data_hash: metadata.data_hash.clone() }
        );
        assert!(matches!(exporter.export(&raw(), true, now).await.unwrap(), ExportOutcome::Written(_)));
    }

    #[tokio::test]
    async fn refuses_an_empty_export() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CatalogExporter::new(dir.path(), PriceFormat::default());
        assert!(exporter.export(&RawCatalog::default(), true, Utc::now()).await.is_err());
    }

    #[test]
    fn hash_ignores_key_order() {
        let mut other = raw();
        other.products[0] = json!({"price": 9.5, "brand": {"name": "Denso"}, "category": "Filtration", "name": "Oil Filter", "id": 1});
        assert_eq!(raw().data_hash().unwrap(), other.data_hash().unwrap());
        other.products[0]["price"] = json!(10);
        assert_ne!(raw().data_hash().unwrap(), other.data_hash().unwrap());
    }
}
