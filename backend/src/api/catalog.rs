use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use common::catalog::CatalogIndex;
use common::vehicle::VehicleIndex;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::get_backend_config;

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read catalog {}", path.display()))
}

/// Reads a combined catalog document, or an export directory holding
/// `filter-data.js` and `search-index.js`.
pub async fn read_catalog_file(path: &Path) -> anyhow::Result<CatalogIndex> {
    let index = if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
        let filter_data = read_text(&path.join("filter-data.js")).await?;
        let search_index = read_text(&path.join("search-index.js")).await?;
        CatalogIndex::from_parts(&filter_data, &search_index)
    } else {
        CatalogIndex::from_json_str(&read_text(path).await?)
    };
    let index = index
        .with_context(|| format!("failed to parse catalog {}", path.display()))?
        .require_products()?;
    info!("loaded {} products from {}", index.total_products(), path.display());
    Ok(index)
}

pub async fn read_vehicle_file(path: &Path) -> anyhow::Result<VehicleIndex> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read vehicle index {}", path.display()))?;
    let index = VehicleIndex::from_json_str(&text).with_context(|| format!("failed to parse vehicle index {}", path.display()))?;
    info!("loaded {} vehicle compatibility records", index.records.len());
    Ok(index)
}

/// The catalog at `CATALOG_PATH`, read once per process.
pub async fn load_catalog_index() -> anyhow::Result<Arc<CatalogIndex>> {
    static CATALOG: OnceCell<Arc<CatalogIndex>> = OnceCell::const_new();
    let catalog = CATALOG
        .get_or_try_init(|| async { read_catalog_file(&get_backend_config().catalog_path).await.map(Arc::new) })
        .await?;
    Ok(catalog.clone())
}

pub async fn load_vehicle_index() -> anyhow::Result<Arc<VehicleIndex>> {
    static VEHICLES: OnceCell<Arc<VehicleIndex>> = OnceCell::const_new();
    let vehicles = VEHICLES
        .get_or_try_init(|| async { read_vehicle_file(&get_backend_config().vehicle_index_path).await.map(Arc::new) })
        .await?;
    Ok(vehicles.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_js_module_catalog_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"window.catalog = {{"brands": [{{"name": "Denso", "count": 1, "slug": "x"}}], "products": [{{"id": 1, "name": "Oil Filter", "brand": "Denso"}}]}};"#).unwrap();

        let index = read_catalog_file(file.path()).await.unwrap();
        assert_eq!(index.brands[0].slug, "denso");
        assert_eq!(index.total_products(), 1);
    }

    #[tokio::test]
    async fn reads_an_export_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("filter-data.js"), r#"window.filterData = {"brands": [{"name": "Denso", "count": 2, "slug": "denso"}]};"#).unwrap();
        std::fs::write(
            dir.path().join("search-index.js"),
            r#"window.searchIndex = [{"id": 1, "name": "Oil Filter", "brand": "Denso"}, {"id": 2, "name": "Air Filter", "brand": "Denso"}];"#,
        )
        .unwrap();

        let index = read_catalog_file(dir.path()).await.unwrap();
        assert_eq!(index.total_products(), 2);
        assert_eq!(index.brands[0].count, 2);

        std::fs::remove_file(dir.path().join("search-index.js")).unwrap();
        assert!(read_catalog_file(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn empty_or_missing_catalogs_are_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert!(read_catalog_file(file.path()).await.is_err());
        assert!(read_catalog_file(Path::new("/nonexistent/catalog.json")).await.is_err());
    }
}
