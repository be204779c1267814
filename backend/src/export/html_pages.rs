//! Static HTML pages written next to the JSON export.

use common::catalog::{FacetBucket, Product};
use common::render::{PriceFormat, escape_html, render_card_html};
use common::slug::slugify;

/// Cards on the static products page.
pub const PRODUCTS_PAGE_LIMIT: usize = 50;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} - Al Saji</title>\n<link rel=\"stylesheet\" href=\"../../assets/main.css\">\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn products_page(products: &[Product], money: &PriceFormat) -> String {
    let cards: String = products.iter().take(PRODUCTS_PAGE_LIMIT).map(|p| render_card_html(p, money)).collect();
    page(
        "Products",
        &format!(
            "<h1>Products</h1>\n<p class=\"results-count\">Showing {} of {}</p>\n<div class=\"products-grid\">{}</div>\n\
             <nav><a href=\"categories.html\">Categories</a> | <a href=\"brands.html\">Brands</a></nav>",
            products.len().min(PRODUCTS_PAGE_LIMIT),
            products.len(),
            cards
        ),
    )
}

/// File name of a product's page under `html/products/`. The id keeps
/// products with the same name apart.
pub fn product_page_file(product: &Product) -> String {
    let slug = product.slug.clone().unwrap_or_else(|| slugify(product.name.as_str()));
    format!("{slug}-{}.html", product.id)
}

pub fn product_page(product: &Product, description: &str, money: &PriceFormat) -> String {
    let field = |label: &str, value: &str| {
        if value.is_empty() {
            String::new()
        } else {
            format!("<dt>{label}</dt><dd>{}</dd>", escape_html(value))
        }
    };
    let stock = if product.in_stock { "In stock" } else { "Out of stock" };
    page(
        &product.name,
        &format!(
            "<article class=\"product-page\" data-product-id=\"{}\">\n<h1>{}</h1>\n<p class=\"product-price\">{}</p>\n\
             <p class=\"product-stock\">{stock}</p>\n<dl>{}{}{}</dl>\n<div class=\"product-description\">{}</div>\n</article>\n\
             <a href=\"../products.html\">Back to Products</a>",
            product.id,
            escape_html(&product.name),
            escape_html(&money.format(product.price)),
            field("Category", &product.category),
            field("Brand", &product.brand),
            field("Code", product.product_code.as_deref().unwrap_or_default()),
            escape_html(description),
        ),
    )
}

pub fn facet_page(title: &str, buckets: &[FacetBucket]) -> String {
    let items: String = buckets
        .iter()
        .map(|b| format!("<li data-slug=\"{}\">{} ({})</li>", escape_html(&b.slug), escape_html(&b.name), b.count))
        .collect();
    page(title, &format!("<h1>{}</h1>\n<ul>{}</ul>\n<a href=\"products.html\">Back to Products</a>", escape_html(title), items))
}
