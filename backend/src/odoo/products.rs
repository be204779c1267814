//! Live product reads for the store service.

use common::catalog::Product;
use common::filter_engine::apply_filters;
use common::filter_state::FilterState;
use common::lenient::{id_of, number_of, text_of};
use serde_json::{Value, json};

use crate::odoo::OdooClient;

const PRODUCT_FIELDS: [&str; 6] = ["id", "name", "list_price", "categ_id", "qty_available", "default_code"];
const LIVE_SEARCH_LIMIT: u64 = 500;

pub(crate) fn product_from_record(record: &Value) -> Product {
    let name = text_of(&record["name"]);
    let category = text_of(&record["categ_id"]);
    let code = text_of(&record["default_code"]);
    Product {
        id: id_of(&record["id"]),
        search_terms: vec![Some(name.clone()), Some(category.clone()), Some(code.clone())],
        name,
        brand: String::new(),
        category,
        price: number_of(&record["list_price"]),
        in_stock: number_of(&record["qty_available"]) > 0.0,
        slug: None,
        image_url: None,
        product_code: Some(code).filter(|c| !c.is_empty()),
    }
}

/// `product.product` has no brand field, so a brand filter cannot be
/// answered from a live read. Callers fall back to the static catalog.
pub fn check_live_filters(filters: &FilterState) -> anyhow::Result<()> {
    if !filters.brands().is_empty() {
        anyhow::bail!("brand filters are not supported by live product reads");
    }
    Ok(())
}

impl OdooClient {
    /// Saleable products, narrowed on the server by name and then by the
    /// usual filter pass.
    pub async fn search_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>> {
        check_live_filters(filters)?;
        let mut domain = vec![json!(["sale_ok", "=", true])];
        if !filters.search_query().is_empty() {
            domain.push(json!(["name", "ilike", filters.search_query()]));
        }
        let records = self
            .execute_kw(
                "product.product",
                "search_read",
                vec![Value::Array(domain)],
                json!({"fields": PRODUCT_FIELDS, "limit": LIVE_SEARCH_LIMIT}),
            )
            .await?;
        let products: Vec<Product> = records.as_array().map(|r| r.iter().map(product_from_record).collect()).unwrap_or_default();
        Ok(apply_filters(filters, &products).products)
    }

    pub async fn read_product(&self, product_id: u64) -> anyhow::Result<Option<Product>> {
        let records = self
            .execute_kw("product.product", "read", vec![json!([product_id])], json!({"fields": PRODUCT_FIELDS}))
            .await?;
        Ok(records.get(0).map(product_from_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_odoo_record_fields() {
        let product = product_from_record(&json!({
            "id": 262209, "name": "A1N156 front disc", "list_price": 38.5,
            "categ_id": [4, "Brake System"], "qty_available": 3.0, "default_code": false
        }));
        assert_eq!(product.category, "Brake System");
        assert!(product.in_stock);
        assert_eq!(product.product_code, None);
        assert_eq!(product.search_terms[2], Some(String::new()));
    }

    #[test]
    fn brand_filters_are_refused_for_live_reads() {
        assert!(check_live_filters(&FilterState::new().with_category("Filtration").with_search_query("oil")).is_ok());
        assert!(check_live_filters(&FilterState::new().with_brand("denso")).is_err());
    }
}
