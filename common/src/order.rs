//! Checkout payloads sent from the cart page to the backend.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::render::PriceFormat;
use crate::store_const::SHIPPING_FEE;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub area: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: u64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_number: String,
    pub customer: CustomerDetails,
    pub payment: String,
    pub items: Vec<OrderItem>,
    /// Sum of line subtotals.
    pub total: f64,
    pub shipping: f64,
    pub tax: f64,
}

impl OrderRequest {
    /// Snapshot the cart. `timestamp_ms` makes the `WEB-` order number.
    pub fn from_cart(cart: &Cart, customer: CustomerDetails, payment: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            order_number: format!("WEB-{timestamp_ms}"),
            customer,
            payment: payment.into(),
            items: cart
                .items()
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            total: cart.total(),
            shipping: SHIPPING_FEE,
            tax: 0.0,
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.total + self.shipping + self.tax
    }

    /// Short note stored on the quotation when it is created.
    pub fn summary_note(&self) -> String {
        format!(
            "Website Order - {}\nCustomer: {}\nPayment: {}",
            self.order_number,
            or_na(&self.customer.full_name),
            or_na(&self.payment)
        )
    }

    /// Full note written once the quotation exists.
    pub fn request_sent_note(&self, money: &PriceFormat, created_at: &str) -> String {
        let c = &self.customer;
        let items: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("- {} (Qty: {}) - {} each", item.name, item.quantity, money.format(item.unit_price)))
            .collect();
        let notes = if c.notes.is_empty() { "None" } else { c.notes.as_str() };

        format!(
            "WEBSITE ORDER - REQUEST SENT\n\
             =================================\n\
             Order Number: {}\n\
             Customer: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Shipping Address: {}\n\
             City: {} | Area: {}\n\
             Payment Method: {}\n\
             Customer Notes: {}\n\n\
             ORDER ITEMS:\n{}\n\n\
             ORDER TOTALS:\n\
             Subtotal: {}\n\
             Shipping: {}\n\
             Tax: {}\n\
             Grand Total: {}\n\n\
             STATUS: REQUEST SENT - Awaiting manual processing\n\
             Created: {}",
            self.order_number,
            or_na(&c.full_name),
            or_na(&c.email),
            or_na(&c.phone),
            or_na(&c.address),
            or_na(&c.city),
            or_na(&c.area),
            or_na(&self.payment),
            notes,
            items.join("\n"),
            money.format(self.total),
            money.format(self.shipping),
            money.format(self.tax),
            money.format(self.grand_total()),
            created_at,
        )
    }
}

fn or_na(text: &str) -> &str {
    if text.is_empty() { "N/A" } else { text }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: String,
    /// Quotation id in Odoo; `None` when the order was only recorded locally.
    pub odoo_order_id: Option<u64>,
    pub message: String,
}
