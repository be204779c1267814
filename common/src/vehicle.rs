//! Vehicle compatibility lookup: make → model → year → compatible parts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{strip_js_module_wrapper, CatalogLoadError, Product};
use crate::lenient::{lenient_bool, lenient_f64, lenient_string, lenient_u32, lenient_u64, optional_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompatibleProduct {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub product_id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub product_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "optional_string")]
    pub image_url: Option<String>,
}

impl CompatibleProduct {
    /// View as a catalog product so the shop renderer can draw it.
    pub fn to_product(&self, vehicle: &VehicleCompatibility) -> Product {
        let mut search_terms = vec![Some(self.product_name.clone())];
        search_terms.push(self.product_code.clone());
        Product {
            id: self.product_id,
            name: self.product_name.clone(),
            brand: vehicle.brand_name.clone(),
            category: String::new(),
            price: self.price,
            in_stock: self.in_stock,
            search_terms,
            slug: None,
            image_url: self.image_url.clone(),
            product_code: self.product_code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VehicleCompatibility {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub vehicle_model_id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_model_name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub brand_id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_name: String,
    #[serde(default)]
    pub compatible_products: Vec<CompatibleProduct>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year_range: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub from_year: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub to_year: u32,
}

impl VehicleCompatibility {
    pub fn covers_year(&self, year: u32) -> bool {
        self.from_year <= year && year <= self.to_year
    }
}

/// The vehicle a visitor picked; remembered between visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSelection {
    pub make_id: u64,
    pub model_id: u64,
    /// `None` accepts every model year.
    pub year: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMake {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub id: u64,
    pub name: String,
    pub year_range: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleIndex {
    pub records: Vec<VehicleCompatibility>,
}

impl VehicleIndex {
    pub fn from_json_str(text: &str) -> Result<Self, CatalogLoadError> {
        Ok(serde_json::from_str(strip_js_module_wrapper(text))?)
    }

    /// Distinct makes in first-seen order.
    pub fn makes(&self) -> Vec<VehicleMake> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.brand_id))
            .map(|r| VehicleMake { id: r.brand_id, name: r.brand_name.clone() })
            .collect()
    }

    pub fn models(&self, make_id: u64) -> Vec<VehicleModel> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| r.brand_id == make_id && seen.insert(r.vehicle_model_id))
            .map(|r| VehicleModel { id: r.vehicle_model_id, name: r.vehicle_model_name.clone(), year_range: r.year_range.clone() })
            .collect()
    }

    /// Model years, newest first. Empty for an unknown model or one with no known years.
    pub fn years(&self, model_id: u64) -> Vec<u32> {
        // 0 marks a missing year in the export
        let records = self
            .records
            .iter()
            .filter(|r| r.vehicle_model_id == model_id && r.from_year > 0 && r.from_year <= r.to_year);
        let (Some(from), Some(to)) = (
            records.clone().map(|r| r.from_year).min(),
            records.map(|r| r.to_year).max(),
        ) else {
            return Vec::new();
        };
        (from..=to).rev().collect()
    }

    pub fn compatible_products(&self, selection: &VehicleSelection) -> Vec<Product> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| r.brand_id == selection.make_id && r.vehicle_model_id == selection.model_id)
            .filter(|r| selection.year.is_none_or(|year| r.covers_year(year)))
            .flat_map(|r| r.compatible_products.iter().map(move |p| (r, p)))
            .filter(|(_, p)| seen.insert(p.product_id))
            .map(|(r, p)| p.to_product(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INDEX: &str = r#"window.vehicle_compatibility_index = [
      {"vehicle_model_id": 252042, "vehicle_model_name": "Land Cruiser", "brand_id": 1787, "brand_name": "Toyota",
       "compatible_products": [{"product_id": 262735, "product_name": "FJ projector", "product_code": "XYH-TY-339", "price": 0, "in_stock": false, "image_url": null}],
       "year_range": "2008-2021", "from_year": 2008, "to_year": 2021},
      {"vehicle_model_id": 252042, "vehicle_model_name": "Land Cruiser", "brand_id": 1787, "brand_name": "Toyota",
       "compatible_products": [
         {"product_id": 262209, "product_name": "A1N156 front disc", "product_code": false, "price": "12.5", "in_stock": true, "image_url": null},
         {"product_id": 262735, "product_name": "FJ projector", "product_code": "XYH-TY-339", "price": 0, "in_stock": false, "image_url": null}
       ],
       "year_range": "2022-2024", "from_year": 2022, "to_year": 2024},
      {"vehicle_model_id": 10, "vehicle_model_name": "Patrol", "brand_id": 5, "brand_name": "Nissan",
       "compatible_products": [], "year_range": "", "from_year": 0, "to_year": 0}
    ];"#;

    fn index() -> VehicleIndex {
        VehicleIndex::from_json_str(INDEX).unwrap()
    }

    #[test]
    fn makes_and_models_are_distinct() {
        let index = index();
        let makes: Vec<u64> = index.makes().iter().map(|m| m.id).collect();
        assert_eq!(makes, vec![1787, 5]);
        assert_eq!(index.models(1787).len(), 1);
        assert!(index.models(42).is_empty());
    }

    #[test]
    fn years_run_newest_first() {
        let years = index().years(252042);
        assert_eq!(years.first(), Some(&2024));
        assert_eq!(years.last(), Some(&2008));
        assert!(index().years(999).is_empty());
    }

    #[test]
    fn models_without_known_years_offer_no_years() {
        assert_eq!(index().years(10), Vec::<u32>::new());
    }

    #[test]
    fn compatible_products_respect_the_year_range() {
        let index = index();
        let pick = |year| VehicleSelection { make_id: 1787, model_id: 252042, year };

        let ids = |year| index.compatible_products(&pick(year)).iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(Some(2010)), vec![262735]);
        assert_eq!(ids(Some(2023)), vec![262209, 262735]);
        assert_eq!(ids(Some(2030)), Vec::<u64>::new());
        // any year: de-duplicated, first-seen order
        assert_eq!(ids(None), vec![262735, 262209]);
    }

    #[test]
    fn compatible_product_becomes_a_catalog_product() {
        let products = index().compatible_products(&VehicleSelection { make_id: 1787, model_id: 252042, year: Some(2023) });
        assert_eq!(products[0].price, 12.5);
        assert_eq!(products[0].brand, "Toyota");
        assert_eq!(products[0].product_code, None);
    }
}
