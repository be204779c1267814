use common::catalog::Product;
use common::lenient::{id_of, number_of, text_of};
use common::slug::slugify;
use serde_json::Value;

/// Characters of the description kept as the fourth search term.
pub const DESCRIPTION_TERM_CHARS: usize = 100;

fn optional_text(value: &Value) -> Option<String> {
    Some(text_of(value)).filter(|s| !s.is_empty())
}

/// Flatten one exported product into a search-index record.
pub fn index_product(raw: &Value) -> Product {
    let name = text_of(&raw["name"]);
    let category = text_of(&raw["category"]);
    let brand = text_of(&raw["brand"]);
    let description: String = text_of(&raw["description"]).chars().take(DESCRIPTION_TERM_CHARS).collect();
    let in_stock = match &raw["in_stock"] {
        Value::Bool(b) => *b,
        _ => number_of(&raw["qty_available"]) > 0.0,
    };

    Product {
        id: id_of(&raw["id"]),
        slug: Some(slugify(name.as_str())),
        search_terms: vec![Some(name.clone()), Some(category.clone()), Some(brand.clone()), Some(description)],
        name,
        category,
        brand,
        price: number_of(&raw["price"]),
        in_stock,
        image_url: optional_text(&raw["image_url"]),
        product_code: optional_text(&raw["default_code"]).or_else(|| optional_text(&raw["product_code"])),
    }
}

pub fn build_search_index(products: &[Value]) -> Vec<Product> {
    products.iter().map(index_product).collect()
}
