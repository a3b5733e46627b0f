//! # Estimation Mapper
//!
//! Bidirectional translation between the composed document and the
//! persisted record shape.
//!
//! ## The Two Directions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  EDIT MODE                                                              │
//! │  ─────────                                                              │
//! │  EstimationRecord ──► from_persisted() ──► EstimationDocument           │
//! │       │                    │                                            │
//! │       │                    ├── name split on first whitespace           │
//! │       │                    ├── "N/A" ⇒ standard, else custom            │
//! │       │                    ├── tolerant numeric coercion per field      │
//! │       │                    └── totals RECOMPUTED, never trusted         │
//! │                                                                         │
//! │  SAVE                                                                   │
//! │  ────                                                                   │
//! │  EstimationDocument ──► to_persisted() ──► EstimationRecord             │
//! │       │                    │                                            │
//! │       │                    ├── sizes re-encoded ("L x W x T" / "N/A")   │
//! │       │                    ├── every numeric stringified                │
//! │       │                    ├── discount percent AND amount emitted      │
//! │       │                    └── serials renumbered 1-based               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted totals exist for list pages only. Re-entering the authoring
//! flow always re-derives them, because the pricing formula or catalog
//! reference data may have changed since the document was saved.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use vulcan_core::{
    AddOnLineItem, BankInfo, CustomerInfo, Dimensions, EstimationDocument, GeometrySnapshot,
    LineItem, LineItemKind, TemplateType, TermsInfo, DEFAULT_GST_PERCENT, STANDARD_SIZE,
};

use crate::coerce::{
    fmt_amount, fmt_number, geometry_or_zero, split_full_name, to_number, to_trimmed_string,
};
use crate::record::{AddOnRecord, EstimationRecord, ProductRecord};

// =============================================================================
// Load For Edit
// =============================================================================

/// Hydrates a composed document from a persisted record.
///
/// Field-specific fallbacks keep legacy and partial records loadable:
/// quantities default to `1`, monetary fields to `0`, a missing GST percent
/// is back-solved from the stored tax figures (assuming
/// [`DEFAULT_GST_PERCENT`] when that is not computable). Every line item
/// and add-on total is recomputed through the calculator before the
/// document is returned.
pub fn from_persisted(record: &EstimationRecord) -> EstimationDocument {
    let (first_name, last_name) = split_full_name(&record.customer_name);

    let mut doc = EstimationDocument::new();
    doc.persisted_id = match record.id.trim() {
        "" => None,
        id => Some(id.to_string()),
    };
    doc.estimation_no = record.estimation_no.clone();
    if let Some(date) = parse_date(&record.date) {
        doc.estimation_date = date;
    }

    doc.customer = CustomerInfo {
        first_name,
        last_name,
        phone: record.customer_phone.clone(),
        email: record.customer_email.clone(),
        address: record.customer_address.clone(),
        gstin: record.customer_gstin.clone(),
    };
    doc.bank = BankInfo {
        bank_name: record.bank_name.clone(),
        account_number: record.account_number.clone(),
        ifsc: record.ifsc.clone(),
        branch: record.branch.clone(),
    };
    doc.terms = TermsInfo {
        payment_terms: record.payment_terms.clone(),
        delivery_terms: record.delivery_terms.clone(),
        validity: record.validity.clone(),
    };

    doc.discount_percent = to_number(&record.discount, 0.0);
    doc.gst_percent = resolve_gst_percent(record);
    doc.template = template_from_str(&record.template_type);

    for product in &record.products {
        let item = line_item_from_record(product);
        match item.kind {
            LineItemKind::Standard => doc.standard_items.push(item),
            LineItemKind::Custom => doc.custom_items.push(item),
        }
    }

    // Stored totals are display-only; the live model re-derives everything.
    doc.recompute_totals();
    debug!(
        items = doc.item_count(),
        gst = doc.gst_percent,
        "hydrated estimation for edit"
    );
    doc
}

fn line_item_from_record(product: &ProductRecord) -> LineItem {
    let size = product.size.trim();
    let (kind, dims) = if size == STANDARD_SIZE {
        (LineItemKind::Standard, None)
    } else {
        (LineItemKind::Custom, Some(Dimensions::from_size_label(size)))
    };

    LineItem {
        id: id_or_fresh(&product.id),
        kind,
        base_product_id: product.product_id.clone(),
        product_name: product.product_name.clone(),
        combo_name: product.combo_name.clone(),
        category_name: product.category_name.clone(),
        quantity: to_number(&product.quantity, 1.0),
        rate: to_number(&product.rate, 0.0),
        min_cost: to_number(&product.min_cost, 0.0),
        max_cost: to_number(&product.max_cost, 0.0),
        dims,
        base_geometry: geometry_from_record(
            &product.base_product_weight,
            &product.base_product_length,
            &product.base_product_width,
            &product.base_product_thickness,
        ),
        total_amount: 0.0, // recomputed by the caller
        remark: product.remark.clone(),
        custom_badge_text: product.custom_badge_text.clone(),
        add_ons: product.add_ons.iter().map(add_on_from_record).collect(),
    }
}

fn add_on_from_record(add_on: &AddOnRecord) -> AddOnLineItem {
    AddOnLineItem {
        id: id_or_fresh(&add_on.id),
        product_id: add_on.product_id.clone(),
        product_name: add_on.product_name.clone(),
        quantity: to_number(&add_on.quantity, 1.0),
        rate: to_number(&add_on.rate, 0.0),
        dims: Dimensions::from_size_label(&add_on.size),
        base_geometry: geometry_from_record(
            &add_on.base_product_weight,
            &add_on.base_product_length,
            &add_on.base_product_width,
            &add_on.base_product_thickness,
        ),
        total_amount: 0.0, // recomputed by the caller
        remark: add_on.remark.clone(),
    }
}

fn geometry_from_record(
    weight: &Value,
    length: &Value,
    width: &Value,
    thickness: &Value,
) -> GeometrySnapshot {
    GeometrySnapshot {
        weight: to_trimmed_string(weight),
        length: to_trimmed_string(length),
        width: to_trimmed_string(width),
        thickness: to_trimmed_string(thickness),
    }
}

/// Explicit GST percent when stored; otherwise back-solved from the stored
/// tax figures; otherwise the legacy default.
fn resolve_gst_percent(record: &EstimationRecord) -> f64 {
    if let Some(value) = &record.gst_percent {
        let explicit = to_number(value, f64::NAN);
        if explicit.is_finite() {
            return explicit;
        }
    }

    let tax_total = to_number(&record.tax_total, 0.0);
    let after_discount = to_number(&record.total_after_discount, 0.0);
    let solved = tax_total / after_discount * 100.0;
    if solved.is_finite() {
        solved
    } else {
        // Legacy record with no tax basis at all; assume the common rate
        // rather than producing a silently tax-free document.
        warn!(
            estimation_no = %record.estimation_no,
            "gst percent not stored and not derivable; assuming {}",
            DEFAULT_GST_PERCENT
        );
        DEFAULT_GST_PERCENT
    }
}

fn id_or_fresh(id: &str) -> String {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

fn template_from_str(template: &str) -> TemplateType {
    match template.trim().to_ascii_lowercase().as_str() {
        "letterhead" => TemplateType::Letterhead,
        _ => TemplateType::Standard,
    }
}

fn template_to_str(template: TemplateType) -> &'static str {
    match template {
        TemplateType::Standard => "standard",
        TemplateType::Letterhead => "letterhead",
    }
}

// =============================================================================
// Build Payload For Save
// =============================================================================

/// Serializes a composed document into the persisted record shape.
///
/// All derived figures are taken from a fresh aggregation pass and
/// stringified to 2 decimals; the discount is emitted twice on purpose
/// (the raw percent under `discount`, the computed currency value under
/// `discountAmount`). Serial numbers follow current display order, 1-based
/// and contiguous — they are not stable across edits.
pub fn to_persisted(doc: &EstimationDocument) -> EstimationRecord {
    let totals = doc.totals().rounded();

    EstimationRecord {
        id: doc.persisted_id.clone().unwrap_or_default(),
        estimation_no: doc.estimation_no.clone(),
        date: doc.estimation_date.format("%Y-%m-%d").to_string(),

        customer_name: doc.customer.full_name(),
        customer_phone: doc.customer.phone.clone(),
        customer_email: doc.customer.email.clone(),
        customer_address: doc.customer.address.clone(),
        customer_gstin: doc.customer.gstin.clone(),

        bank_name: doc.bank.bank_name.clone(),
        account_number: doc.bank.account_number.clone(),
        ifsc: doc.bank.ifsc.clone(),
        branch: doc.bank.branch.clone(),

        payment_terms: doc.terms.payment_terms.clone(),
        delivery_terms: doc.terms.delivery_terms.clone(),
        validity: doc.terms.validity.clone(),

        products: doc
            .line_items()
            .enumerate()
            .map(|(index, item)| product_to_record(index + 1, item))
            .collect(),

        sub_total: Value::String(fmt_amount(totals.subtotal)),
        discount: Value::String(fmt_number(doc.discount_percent)),
        discount_amount: Value::String(fmt_amount(totals.discount_amount)),
        total_after_discount: Value::String(fmt_amount(totals.after_discount)),
        cgst: Value::String(fmt_amount(totals.cgst)),
        sgst: Value::String(fmt_amount(totals.sgst)),
        tax_total: Value::String(fmt_amount(totals.tax_amount)),
        grand_total: Value::String(fmt_amount(totals.grand_total)),
        gst_percent: Some(Value::String(fmt_number(doc.gst_percent))),

        template_type: template_to_str(doc.template).to_string(),
    }
}

fn product_to_record(serial: usize, item: &LineItem) -> ProductRecord {
    ProductRecord {
        id: item.id.clone(),
        serial_no: Value::String(serial.to_string()),
        product_id: item.base_product_id.clone(),
        product_name: item.product_name.clone(),
        combo_name: item.combo_name.clone(),
        category_name: item.category_name.clone(),
        size: item.size_label(),
        quantity: Value::String(fmt_number(item.quantity)),
        rate: Value::String(fmt_number(item.rate)),
        total: Value::String(fmt_amount(item.total_amount)),
        min_cost: Value::String(fmt_number(item.min_cost)),
        max_cost: Value::String(fmt_number(item.max_cost)),
        base_product_weight: Value::String(geometry_or_zero(&item.base_geometry.weight)),
        base_product_length: Value::String(geometry_or_zero(&item.base_geometry.length)),
        base_product_width: Value::String(geometry_or_zero(&item.base_geometry.width)),
        base_product_thickness: Value::String(geometry_or_zero(&item.base_geometry.thickness)),
        remark: item.remark.clone(),
        custom_badge_text: item.custom_badge_text.clone(),
        add_ons: item.add_ons.iter().map(add_on_to_record).collect(),
    }
}

fn add_on_to_record(add_on: &AddOnLineItem) -> AddOnRecord {
    AddOnRecord {
        id: add_on.id.clone(),
        product_id: add_on.product_id.clone(),
        product_name: add_on.product_name.clone(),
        size: add_on.size_label(),
        quantity: Value::String(fmt_number(add_on.quantity)),
        rate: Value::String(fmt_number(add_on.rate)),
        total: Value::String(fmt_amount(add_on.total_amount)),
        base_product_weight: Value::String(geometry_or_zero(&add_on.base_geometry.weight)),
        base_product_length: Value::String(geometry_or_zero(&add_on.base_geometry.length)),
        base_product_width: Value::String(geometry_or_zero(&add_on.base_geometry.width)),
        base_product_thickness: Value::String(geometry_or_zero(&add_on.base_geometry.thickness)),
        remark: add_on.remark.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vulcan_core::CatalogBaseProduct;

    fn sheet_product() -> CatalogBaseProduct {
        CatalogBaseProduct {
            id: "bp-sheet".to_string(),
            name: "Rubber Sheet".to_string(),
            default_length: "48".to_string(),
            default_width: "26".to_string(),
            default_thickness: "1".to_string(),
            default_weight: "120".to_string(),
            rate_per_unit: "750".to_string(),
            rate_per_kg: "500".to_string(),
            min_cost: 50.0,
            max_cost: 800.0,
            gst_percent: 18.0,
            remark: String::new(),
        }
    }

    fn liner_product() -> CatalogBaseProduct {
        CatalogBaseProduct {
            id: "bp-liner".to_string(),
            name: "Liner".to_string(),
            default_length: "10".to_string(),
            default_width: "10".to_string(),
            default_thickness: "10".to_string(),
            default_weight: "10".to_string(),
            rate_per_unit: "90".to_string(),
            rate_per_kg: "40".to_string(),
            min_cost: 0.0,
            max_cost: 0.0,
            gst_percent: 18.0,
            remark: String::new(),
        }
    }

    fn composed_document() -> EstimationDocument {
        let mut doc = EstimationDocument::new();
        doc.customer = CustomerInfo {
            first_name: "Rayal".to_string(),
            last_name: "Nuts".to_string(),
            phone: "9876500000".to_string(),
            email: String::new(),
            address: "14 Market Road".to_string(),
            gstin: String::new(),
        };
        doc.add_standard_item(&sheet_product(), "Belting", "Sheets", 2.0, None)
            .unwrap();
        doc.add_custom_item(
            &sheet_product(),
            "Belting",
            "Sheets",
            2.0,
            Dimensions::new("24", "13", "1"),
            None,
        )
        .unwrap();
        let parent_id = doc.custom_items[0].id.clone();
        doc.add_add_on(
            &parent_id,
            &liner_product(),
            2.0,
            Dimensions::new("5", "5", "5"),
            None,
        )
        .unwrap();
        doc.set_discount_percent(10.0);
        doc.set_gst_percent(18.0);
        doc
    }

    #[test]
    fn test_to_persisted_partitions_and_serials() {
        let record = to_persisted(&composed_document());

        assert_eq!(record.products.len(), 2);
        assert_eq!(record.products[0].size, "N/A");
        assert_eq!(record.products[1].size, "24 x 13 x 1");
        assert_eq!(record.products[0].serial_no, json!("1"));
        assert_eq!(record.products[1].serial_no, json!("2"));
        assert_eq!(record.products[1].add_ons.len(), 1);
        assert_eq!(record.products[1].add_ons[0].size, "5 x 5 x 5");
    }

    #[test]
    fn test_to_persisted_stringifies_figures() {
        let record = to_persisted(&composed_document());

        // subtotal = 1500 + 30000 + 100 = 31600
        assert_eq!(record.sub_total, json!("31600.00"));
        // discount is the PERCENT, discountAmount the currency value
        assert_eq!(record.discount, json!("10"));
        assert_eq!(record.discount_amount, json!("3160.00"));
        assert_eq!(record.total_after_discount, json!("28440.00"));
        assert_eq!(record.tax_total, json!("5119.20"));
        assert_eq!(record.cgst, json!("2559.60"));
        assert_eq!(record.sgst, json!("2559.60"));
        assert_eq!(record.grand_total, json!("33559.20"));
        assert_eq!(record.gst_percent, Some(json!("18")));
        assert_eq!(record.products[0].quantity, json!("2"));
        assert_eq!(record.products[0].total, json!("1500.00"));
    }

    #[test]
    fn test_to_persisted_customer_name_joined() {
        let record = to_persisted(&composed_document());
        assert_eq!(record.customer_name, "Rayal Nuts");
    }

    #[test]
    fn test_from_persisted_splits_name() {
        let mut record = EstimationRecord::default();
        record.customer_name = "Rayal Nuts".to_string();
        let doc = from_persisted(&record);
        assert_eq!(doc.customer.first_name, "Rayal");
        assert_eq!(doc.customer.last_name, "Nuts");

        record.customer_name = "Rayal".to_string();
        let doc = from_persisted(&record);
        assert_eq!(doc.customer.first_name, "Rayal");
        assert_eq!(doc.customer.last_name, "");
    }

    #[test]
    fn test_from_persisted_coercion_fallbacks() {
        let raw = json!({
            "products": [{
                "productId": "bp-1",
                "productName": "Rubber Sheet",
                "size": "N/A",
                "quantity": "not a number",
                "rate": 750
            }]
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        let doc = from_persisted(&record);

        let item = &doc.standard_items[0];
        assert_eq!(item.quantity, 1.0); // quantity falls back to 1
        assert_eq!(item.rate, 750.0); // numbers accepted where strings belong
        assert_eq!(item.min_cost, 0.0); // monetary fields fall back to 0
        assert_eq!(item.total_amount, 750.0); // recomputed, not read
    }

    #[test]
    fn test_from_persisted_totals_recomputed_not_trusted() {
        let raw = json!({
            "products": [{
                "productId": "bp-1",
                "productName": "Rubber Sheet",
                "size": "N/A",
                "quantity": "2",
                "rate": "750",
                "total": "999999.00"
            }],
            "subTotal": "999999.00"
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        let doc = from_persisted(&record);
        assert_eq!(doc.standard_items[0].total_amount, 1500.0);
        assert_eq!(doc.totals().subtotal, 1500.0);
    }

    #[test]
    fn test_from_persisted_partitions_by_size_sentinel() {
        let raw = json!({
            "products": [
                { "productId": "a", "size": "N/A", "quantity": "1", "rate": "10" },
                { "productId": "b", "size": "24 x 13", "quantity": "1", "rate": "10" }
            ]
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        let doc = from_persisted(&record);

        assert_eq!(doc.standard_items.len(), 1);
        assert_eq!(doc.custom_items.len(), 1);
        // A short size label fills missing tokens with "0"...
        let dims = doc.custom_items[0].dims.clone().unwrap();
        assert_eq!(dims.length, "24");
        assert_eq!(dims.width, "13");
        assert_eq!(dims.thickness, "0");
        // ...which prices to 0 rather than erroring.
        assert_eq!(doc.custom_items[0].total_amount, 0.0);
    }

    #[test]
    fn test_gst_explicit_wins() {
        let raw = json!({
            "gstPercent": "12",
            "taxTotal": "16200",
            "totalAfterDiscount": "90000"
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(from_persisted(&record).gst_percent, 12.0);
    }

    #[test]
    fn test_gst_back_solved_for_legacy_records() {
        let raw = json!({
            "taxTotal": "16200",
            "totalAfterDiscount": "90000"
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(from_persisted(&record).gst_percent, 18.0);
    }

    #[test]
    fn test_gst_defaults_when_not_derivable() {
        let raw = json!({
            "taxTotal": "0",
            "totalAfterDiscount": "0"
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(from_persisted(&record).gst_percent, DEFAULT_GST_PERCENT);
    }

    #[test]
    fn test_legacy_rows_get_fresh_ids() {
        let raw = json!({
            "products": [{ "productId": "bp-1", "size": "N/A", "quantity": "1", "rate": "10" }]
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        let doc = from_persisted(&record);
        assert!(!doc.standard_items[0].id.is_empty());
    }

    #[test]
    fn test_geometry_snapshot_falls_back_to_zero_string() {
        // An item whose snapshot was never captured still saves.
        let raw = json!({
            "products": [{ "productId": "bp-1", "size": "N/A", "quantity": "1", "rate": "10" }]
        });
        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        let doc = from_persisted(&record);
        let saved = to_persisted(&doc);
        assert_eq!(saved.products[0].base_product_weight, json!("0"));
        assert_eq!(saved.products[0].base_product_thickness, json!("0"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let original = composed_document();
        let restored = from_persisted(&to_persisted(&original));

        assert_eq!(
            restored.standard_items[0].id,
            original.standard_items[0].id
        );
        assert_eq!(restored.custom_items[0].id, original.custom_items[0].id);
        assert_eq!(restored.standard_items[0].quantity, 2.0);
        assert_eq!(
            restored.custom_items[0].dims,
            original.custom_items[0].dims
        );
        assert_eq!(restored.custom_items[0].add_ons.len(), 1);
        assert_eq!(
            restored.custom_items[0].add_ons[0].id,
            original.custom_items[0].add_ons[0].id
        );
        assert_eq!(
            restored.custom_items[0].add_ons[0].base_geometry,
            original.custom_items[0].add_ons[0].base_geometry
        );
        assert_eq!(restored.discount_percent, 10.0);
        assert_eq!(restored.gst_percent, 18.0);
        assert_eq!(restored.customer.first_name, "Rayal");
        assert_eq!(restored.template, original.template);
        assert_eq!(restored.estimation_date, original.estimation_date);

        // Totals are recomputed rather than copied, but must agree.
        let a = original.totals().rounded();
        let b = restored.totals().rounded();
        assert!((a.grand_total - b.grand_total).abs() < 1e-6);
        assert!((a.subtotal - b.subtotal).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_min_max_cost_survive() {
        let original = composed_document();
        let restored = from_persisted(&to_persisted(&original));
        assert_eq!(restored.standard_items[0].min_cost, 50.0);
        assert_eq!(restored.standard_items[0].max_cost, 800.0);
    }
}
