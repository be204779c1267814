//! Facet buckets and price ranges computed at export time.

use common::catalog::{FacetBucket, PriceBucket};
use common::lenient::{number_of, text_of};
use serde_json::Value;

/// Name of a category/brand/branch value, `None` when the product has none.
fn facet_name(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Object(map) => Some(map.get("name").map(text_of).filter(|n| !n.is_empty()).unwrap_or("Unknown".to_string())),
        other => Some(text_of(other)),
    }
}

/// Count occurrences in first-seen order.
fn count_in_order(names: impl Iterator<Item = String>) -> Vec<FacetBucket> {
    let mut buckets: Vec<FacetBucket> = Vec::new();
    for name in names {
        match buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(FacetBucket::new(name, 1)),
        }
    }
    buckets
}

pub fn facet_counts(products: &[Value], field: &str) -> Vec<FacetBucket> {
    count_in_order(products.iter().filter_map(|p| facet_name(&p[field])))
}

/// Branches are a list per product; each listed branch counts once.
pub fn branch_counts(products: &[Value]) -> Vec<FacetBucket> {
    count_in_order(
        products
            .iter()
            .filter_map(|p| p["branches"].as_array())
            .flat_map(|branches| branches.iter().filter_map(facet_name)),
    )
}

fn product_price(product: &Value) -> Option<f64> {
    match &product["price"] {
        Value::Number(_) => Some(number_of(&product["price"])),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    }
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Five-ish equal-width buckets between the lowest and highest price.
///
/// Each bucket spans `[current, current + step]` and the next one starts one
/// cent higher; buckets holding no product are left out.
pub fn price_ranges(products: &[Value]) -> Vec<PriceBucket> {
    let prices: Vec<f64> = products.iter().filter_map(product_price).collect();
    let Some(min) = prices.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = prices.iter().copied().fold(min, f64::max);

    if min == max {
        return vec![PriceBucket { min, max, count: prices.len() as u64, label: money(min) }];
    }

    let step = ((max - min) / 5.0).floor().max(1.0);
    let mut ranges = Vec::new();
    let mut current = min;
    while current <= max {
        let upper = current + step;
        let count = prices.iter().filter(|p| current <= **p && **p <= upper).count() as u64;
        if count > 0 {
            ranges.push(PriceBucket { min: current, max: upper, count, label: format!("{} - {}", money(current), money(upper)) });
        }
        current = upper + 0.01;
    }
    ranges
}
