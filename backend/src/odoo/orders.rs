//! Quotation creation for website orders.

use chrono::Local;
use common::order::{CustomerDetails, OrderRequest};
use common::render::PriceFormat;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::odoo::OdooClient;

/// Odoo's default public partner.
pub const PUBLIC_PARTNER_ID: u64 = 1;

/// `(0, 0, values)` creates a new one2many line.
pub fn order_line_commands(order: &OrderRequest) -> Vec<Value> {
    order
        .items
        .iter()
        .map(|item| {
            json!([0, 0, {
                "product_id": item.product_id,
                "product_uom_qty": item.quantity,
                "price_unit": item.unit_price,
                "name": item.name,
                "tax_id": false,
            }])
        })
        .collect()
}

pub fn sale_order_values(order: &OrderRequest, partner_id: u64) -> Value {
    json!({
        "partner_id": partner_id,
        "partner_invoice_id": partner_id,
        "partner_shipping_id": partner_id,
        "order_line": order_line_commands(order),
        "client_order_ref": order.order_number,
        "note": order.summary_note(),
        "state": "draft",
        "require_payment": false,
        "require_signature": false,
    })
}

fn partner_values(customer: &CustomerDetails) -> Value {
    let name = if customer.full_name.is_empty() { "Website Customer" } else { customer.full_name.as_str() };
    json!({
        "name": name,
        "email": customer.email,
        "phone": customer.phone,
        "street": customer.address,
        "city": customer.city,
        "type": "invoice",
        "company_type": "person",
    })
}

impl OdooClient {
    /// Partner id for the customer's email, creating the partner if needed.
    /// Any failure lands on [`PUBLIC_PARTNER_ID`].
    pub async fn find_or_create_customer(&self, customer: &CustomerDetails) -> u64 {
        if customer.email.is_empty() {
            return PUBLIC_PARTNER_ID;
        }
        match self.lookup_or_create_partner(customer).await {
            Ok(id) => id,
            Err(e) => {
                warn!("customer lookup/creation failed: {e:#}");
                PUBLIC_PARTNER_ID
            }
        }
    }

    async fn lookup_or_create_partner(&self, customer: &CustomerDetails) -> anyhow::Result<u64> {
        let found = self
            .execute_kw(
                "res.partner",
                "search_read",
                vec![],
                json!({"domain": [["email", "=", customer.email]], "fields": ["id"], "limit": 1}),
            )
            .await?;
        if let Some(id) = found.get(0).and_then(|p| p.get("id")).and_then(Value::as_u64) {
            info!("found existing customer {id}");
            return Ok(id);
        }

        let created = self.execute_kw("res.partner", "create", vec![partner_values(customer)], json!({})).await?;
        created.as_u64().ok_or_else(|| anyhow::anyhow!("res.partner.create returned {created}"))
    }

    /// Create the draft quotation and stamp it as sent. Returns the `sale.order` id.
    pub async fn create_sale_order(&self, order: &OrderRequest, money: &PriceFormat) -> anyhow::Result<u64> {
        let partner_id = self.find_or_create_customer(&order.customer).await;
        let created = self.execute_kw("sale.order", "create", vec![sale_order_values(order, partner_id)], json!({})).await?;
        let order_id = created.as_u64().ok_or_else(|| anyhow::anyhow!("Failed to create order in Odoo: {created}"))?;
        info!("sale order {order_id} created for {}", order.order_number);

        self.mark_as_request_sent(order_id, order, money).await;
        Ok(order_id)
    }

    async fn mark_as_request_sent(&self, order_id: u64, order: &OrderRequest, money: &PriceFormat) {
        let created_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let note = order.request_sent_note(money, &created_at);
        match self.execute_kw("sale.order", "write", vec![json!([order_id]), json!({"note": note})], json!({})).await {
            Ok(Value::Bool(true)) => info!("order {order_id} marked as request sent"),
            Ok(other) => warn!("could not update notes on order {order_id}: {other}"),
            Err(e) => warn!("could not mark order {order_id} as request sent: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::cart::Cart;
    use common::catalog::Product;
    use pretty_assertions::assert_eq;

    #[test]
    fn quotation_lines_use_create_commands() {
        let mut cart = Cart::new();
        let pad = Product { id: 42, name: "Brake Pad".to_string(), price: 38.5, ..Default::default() };
        cart.add(&pad, 2).unwrap();
        let order = OrderRequest::from_cart(&cart, CustomerDetails::default(), "cash", 7);

        let values = sale_order_values(&order, 9);
        assert_eq!(
            values["order_line"],
            json!([[0, 0, {"product_id": 42, "product_uom_qty": 2, "price_unit": 38.5, "name": "Brake Pad", "tax_id": false}]])
        );
        assert_eq!(values["partner_shipping_id"], json!(9));
        assert_eq!(values["client_order_ref"], json!("WEB-7"));
        assert_eq!(values["state"], json!("draft"));
    }

    #[test]
    fn anonymous_partner_gets_a_placeholder_name() {
        assert_eq!(partner_values(&CustomerDetails::default())["name"], json!("Website Customer"));
    }
}
