//! Projection of a filter pass into display-ready records.
//!
//! Text fields are HTML-escaped here so both the Dioxus views and the static
//! catalog export can insert them as markup.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::filter_engine::FilterResult;
use crate::slug::slugify;
use crate::store_const::{DEFAULT_CURRENCY_PREFIX, EMPTY_RESULTS_MESSAGE};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    pub prefix: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self { prefix: DEFAULT_CURRENCY_PREFIX.to_string() }
    }
}

impl PriceFormat {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Two decimals behind the prefix; non-finite amounts print as zero.
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        format!("{}{:.2}", self.prefix, amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// A product card. `name`, `category` and `brand` are already escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: String,
    pub stock: StockStatus,
    pub slug: String,
    pub image_url: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product, price_format: &PriceFormat) -> Self {
        Self {
            id: product.id,
            name: escape_html(&product.name),
            category: escape_html(&product.category),
            brand: escape_html(&product.brand),
            price: price_format.format(product.price),
            stock: if product.in_stock { StockStatus::InStock } else { StockStatus::OutOfStock },
            slug: product.slug.clone().unwrap_or_else(|| slugify(product.name.as_str())),
            image_url: product.image_url.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        let image = match &self.image_url {
            Some(url) => format!(r#"<img src="{}" alt="{}" loading="lazy">"#, escape_html(url), self.name),
            None => r#"<div class="product-image-placeholder"></div>"#.to_string(),
        };
        let stock_class = match self.stock {
            StockStatus::InStock => "in-stock",
            StockStatus::OutOfStock => "out-of-stock",
        };
        format!(
            concat!(
                r#"<div class="product-card" data-product-id="{id}">"#,
                r#"<div class="product-image">{image}</div>"#,
                r#"<div class="product-info">"#,
                r#"<h3 class="product-name">{name}</h3>"#,
                r#"<p class="product-category">{category}</p>"#,
                r#"<p class="product-brand">{brand}</p>"#,
                r#"<div class="product-price">{price}</div>"#,
                r#"<div class="product-stock {stock_class}">{stock}</div>"#,
                r#"</div></div>"#,
            ),
            id = self.id,
            image = image,
            name = self.name,
            category = self.category,
            brand = self.brand,
            price = self.price,
            stock_class = stock_class,
            stock = self.stock.label(),
        )
    }
}

/// "Showing X of Y". Construction clamps `shown` to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSummary {
    shown: usize,
    total: usize,
}

impl CountSummary {
    pub fn new(shown: usize, total: usize) -> Self {
        Self { shown: shown.min(total), total }
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl std::fmt::Display for CountSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {}", self.shown, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultBody {
    Empty { message: String },
    Cards(Vec<ProductCard>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedResults {
    pub summary: CountSummary,
    pub body: ResultBody,
}

impl RenderedResults {
    pub fn to_html(&self) -> String {
        let body = match &self.body {
            ResultBody::Empty { message } => format!(r#"<div class="no-products">{}</div>"#, escape_html(message)),
            ResultBody::Cards(cards) => cards.iter().map(ProductCard::to_html).collect(),
        };
        format!(r#"<p class="results-count">{}</p><div class="products-grid">{}</div>"#, self.summary, body)
    }
}

pub fn render_results(products: &[Product], total_count: usize, price_format: &PriceFormat) -> RenderedResults {
    let summary = CountSummary::new(products.len(), total_count);
    let body = if products.is_empty() {
        ResultBody::Empty { message: EMPTY_RESULTS_MESSAGE.to_string() }
    } else {
        ResultBody::Cards(products.iter().map(|p| ProductCard::from_product(p, price_format)).collect())
    };
    RenderedResults { summary, body }
}

pub fn render_filter_result(result: &FilterResult, price_format: &PriceFormat) -> RenderedResults {
    render_results(&result.products, result.total_count, price_format)
}

/// Static card markup for the catalog page export.
pub fn render_card_html(product: &Product, price_format: &PriceFormat) -> String {
    ProductCard::from_product(product, price_format).to_html()
}
