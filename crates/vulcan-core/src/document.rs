//! # Estimation Document
//!
//! The composed document being authored: the two line item collections,
//! their nested add-ons, and every mutation the authoring flow performs.
//!
//! ## Composer Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Document Mutations                                     │
//! │                                                                         │
//! │  Host Action               Mutation                   Recompute         │
//! │  ───────────               ────────                   ─────────         │
//! │                                                                         │
//! │  Pick product ───────────► add_standard_item() ─────► standard_total   │
//! │                                                                         │
//! │  Enter dimensions ───────► add_custom_item() ───────► volumetric_total │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───────► kind-appropriate │
//! │                                                                         │
//! │  Change size ────────────► update_custom_size() ────► volumetric_total │
//! │                                                                         │
//! │  Attach add-on ──────────► add_add_on() ────────────► volumetric_total │
//! │                                                                         │
//! │  NOTE: every mutation recomputes the touched total before returning.   │
//! │        Totals are never stale and never hand-set.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Rejected mutations leave the document unchanged and return a typed
//! [`ComposeError`]; the caller surfaces the message. Non-positive
//! quantities and dimensions are silently ignored (state unchanged, `Ok`).

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ComposeError, CoreResult};
use crate::pricing::{
    parse_decimal, resolve_effective_rate, standard_total, validate_rate_bounds, volumetric_total,
    RateBoundCheck,
};
use crate::types::{
    BankInfo, CatalogBaseProduct, CustomerInfo, Dimensions, GeometrySnapshot, TemplateType,
    TermsInfo,
};
use crate::{MAX_LINE_ITEMS, STANDARD_SIZE};

// =============================================================================
// Line Item Kind
// =============================================================================

/// Standard items are priced flat per unit; custom items are cut to the
/// customer's dimensions and priced by estimated weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LineItemKind {
    Standard,
    Custom,
}

// =============================================================================
// Add-On Line Item
// =============================================================================

/// A secondary priced item attached to one line item.
///
/// Always priced volumetrically against its *own* geometry snapshot, taken
/// from the add-on's catalog entry — never the parent's.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddOnLineItem {
    /// Stable id, unique within the document (UUID v4).
    pub id: String,

    /// Catalog product id; uniqueness key among siblings.
    pub product_id: String,

    pub product_name: String,

    pub quantity: f64,

    /// Per-kg rate actually charged.
    pub rate: f64,

    pub dims: Dimensions,

    /// The add-on product's own reference geometry (frozen).
    pub base_geometry: GeometrySnapshot,

    /// Derived, never hand-set.
    pub total_amount: f64,

    /// Free-text note, preserved across persistence round-trips.
    pub remark: String,
}

impl AddOnLineItem {
    /// Creates an add-on from its catalog entry.
    pub fn from_catalog(
        product: &CatalogBaseProduct,
        quantity: f64,
        dims: Dimensions,
        rate_override: Option<&str>,
    ) -> Self {
        let rate = resolve_effective_rate(rate_override, &product.rate_per_kg);
        let mut add_on = AddOnLineItem {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            rate,
            dims,
            base_geometry: GeometrySnapshot::from_catalog(product),
            total_amount: 0.0,
            remark: product.remark.clone(),
        };
        add_on.recompute_total();
        add_on
    }

    /// The `"L x W x T"` label for this add-on.
    pub fn size_label(&self) -> String {
        self.dims.size_label()
    }

    /// Recomputes the derived total from the add-on's own snapshot.
    pub fn recompute_total(&mut self) {
        self.total_amount =
            volumetric_total(self.quantity, &self.dims, self.rate, &self.base_geometry);
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A standard or custom line item, owned exclusively by the document.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Stable id, unique within the document (UUID v4).
    pub id: String,

    pub kind: LineItemKind,

    /// Catalog product id at selection time.
    pub base_product_id: String,

    pub product_name: String,
    pub combo_name: String,
    pub category_name: String,

    pub quantity: f64,

    /// Effective unit price actually charged (override or catalog default).
    pub rate: f64,

    /// Cost floor copied from the catalog at selection time (frozen).
    pub min_cost: f64,

    /// Cost ceiling copied from the catalog at selection time (frozen).
    pub max_cost: f64,

    /// Requested cut dimensions; `None` for standard items.
    pub dims: Option<Dimensions>,

    /// The base product's own reference geometry (frozen), required for
    /// pricing this item and displayed alongside it.
    pub base_geometry: GeometrySnapshot,

    /// Derived, never hand-set.
    pub total_amount: f64,

    pub remark: String,
    pub custom_badge_text: String,

    /// Insertion order is display order.
    pub add_ons: Vec<AddOnLineItem>,
}

impl LineItem {
    /// Creates a standard line item (flat per-unit pricing).
    pub fn standard(
        product: &CatalogBaseProduct,
        combo_name: &str,
        category_name: &str,
        quantity: f64,
        rate_override: Option<&str>,
    ) -> Self {
        let rate = resolve_effective_rate(rate_override, &product.rate_per_unit);
        let mut item = LineItem {
            id: Uuid::new_v4().to_string(),
            kind: LineItemKind::Standard,
            base_product_id: product.id.clone(),
            product_name: product.name.clone(),
            combo_name: combo_name.to_string(),
            category_name: category_name.to_string(),
            quantity,
            rate,
            min_cost: product.min_cost,
            max_cost: product.max_cost,
            dims: None,
            base_geometry: GeometrySnapshot::from_catalog(product),
            total_amount: 0.0,
            remark: product.remark.clone(),
            custom_badge_text: String::new(),
            add_ons: Vec::new(),
        };
        item.recompute_total();
        item
    }

    /// Creates a custom line item (weight-derived pricing).
    pub fn custom(
        product: &CatalogBaseProduct,
        combo_name: &str,
        category_name: &str,
        quantity: f64,
        dims: Dimensions,
        rate_override: Option<&str>,
    ) -> Self {
        let rate = resolve_effective_rate(rate_override, &product.rate_per_kg);
        let mut item = LineItem {
            id: Uuid::new_v4().to_string(),
            kind: LineItemKind::Custom,
            base_product_id: product.id.clone(),
            product_name: product.name.clone(),
            combo_name: combo_name.to_string(),
            category_name: category_name.to_string(),
            quantity,
            rate,
            min_cost: product.min_cost,
            max_cost: product.max_cost,
            dims: Some(dims),
            base_geometry: GeometrySnapshot::from_catalog(product),
            total_amount: 0.0,
            remark: product.remark.clone(),
            custom_badge_text: String::new(),
            add_ons: Vec::new(),
        };
        item.recompute_total();
        item
    }

    /// The size label shown and persisted for this item.
    ///
    /// Standard items have no geometry of their own and render the
    /// sentinel `"N/A"`.
    pub fn size_label(&self) -> String {
        match &self.dims {
            Some(dims) => dims.size_label(),
            None => STANDARD_SIZE.to_string(),
        }
    }

    /// Recomputes the derived total with the kind-appropriate formula.
    pub fn recompute_total(&mut self) {
        self.total_amount = match (&self.kind, &self.dims) {
            (LineItemKind::Standard, _) => standard_total(self.rate, self.quantity),
            (LineItemKind::Custom, Some(dims)) => {
                volumetric_total(self.quantity, dims, self.rate, &self.base_geometry)
            }
            // A custom item without dimensions is not computable yet.
            (LineItemKind::Custom, None) => 0.0,
        };
    }

    /// Sum of this item's add-on totals.
    pub fn add_ons_total(&self) -> f64 {
        self.add_ons.iter().map(|a| a.total_amount).sum()
    }

    /// Checks this item's rate against its frozen cost bounds.
    pub fn rate_bounds(&self) -> RateBoundCheck {
        validate_rate_bounds(self.rate, self.min_cost, self.max_cost)
    }
}

// =============================================================================
// Estimation Document
// =============================================================================

/// The aggregate root: everything the authoring flow composes.
///
/// ## Invariants
/// - Standard items are unique by base product id
/// - Custom items are unique by (base product id, size label)
/// - An add-on's product id is unique among its parent's add-ons
/// - Derived totals are recomputed on every mutation, never stored stale
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EstimationDocument {
    /// Persisted identifier when editing an existing estimation.
    pub persisted_id: Option<String>,

    /// Human-facing estimation number (assigned by the host on save).
    pub estimation_no: String,

    #[ts(as = "String")]
    pub estimation_date: NaiveDate,

    pub standard_items: Vec<LineItem>,
    pub custom_items: Vec<LineItem>,

    pub customer: CustomerInfo,
    pub bank: BankInfo,
    pub terms: TermsInfo,

    /// Percent, not currency. `>= 0`.
    pub discount_percent: f64,

    /// Percent, split evenly into CGST/SGST. Must be `> 0` to finalize.
    pub gst_percent: f64,

    pub template: TemplateType,
}

impl EstimationDocument {
    /// Creates an empty document dated today.
    pub fn new() -> Self {
        EstimationDocument {
            persisted_id: None,
            estimation_no: String::new(),
            estimation_date: Utc::now().date_naive(),
            standard_items: Vec::new(),
            custom_items: Vec::new(),
            customer: CustomerInfo::default(),
            bank: BankInfo::default(),
            terms: TermsInfo::default(),
            discount_percent: 0.0,
            gst_percent: 0.0,
            template: TemplateType::default(),
        }
    }

    /// Discards everything and returns to the empty state.
    ///
    /// "Cancellation" of an authoring session is exactly this: there are no
    /// partial writes to unwind.
    pub fn reset(&mut self) {
        *self = EstimationDocument::new();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All line items in display order: standard first, then custom.
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.standard_items.iter().chain(self.custom_items.iter())
    }

    /// Number of line items across both collections.
    pub fn item_count(&self) -> usize {
        self.standard_items.len() + self.custom_items.len()
    }

    /// True when neither collection holds an item.
    pub fn is_empty(&self) -> bool {
        self.standard_items.is_empty() && self.custom_items.is_empty()
    }

    fn item_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.standard_items
            .iter_mut()
            .chain(self.custom_items.iter_mut())
            .find(|item| item.id == id)
    }

    // =========================================================================
    // Line Item Mutations
    // =========================================================================

    /// Adds a standard line item for a catalog product.
    ///
    /// Rejects a second item for the same catalog product; the caller
    /// surfaces the duplicate message and the document is unchanged.
    pub fn add_standard_item(
        &mut self,
        product: &CatalogBaseProduct,
        combo_name: &str,
        category_name: &str,
        quantity: f64,
        rate_override: Option<&str>,
    ) -> CoreResult<()> {
        if self
            .standard_items
            .iter()
            .any(|item| item.base_product_id == product.id)
        {
            return Err(ComposeError::DuplicateLineItem {
                product_name: product.name.clone(),
            });
        }
        self.check_capacity()?;

        let item = LineItem::standard(product, combo_name, category_name, quantity, rate_override);
        debug!(item_id = %item.id, product = %product.name, "standard line item added");
        self.standard_items.push(item);
        Ok(())
    }

    /// Adds a custom line item for a catalog product at the given cut.
    ///
    /// Rejects a second item with the same (base product, size label) pair.
    /// Labels are compared as formatted strings: `"24"` and `"24.0"` are
    /// distinct keys.
    pub fn add_custom_item(
        &mut self,
        product: &CatalogBaseProduct,
        combo_name: &str,
        category_name: &str,
        quantity: f64,
        dims: Dimensions,
        rate_override: Option<&str>,
    ) -> CoreResult<()> {
        let size = dims.size_label();
        if self
            .custom_items
            .iter()
            .any(|item| item.base_product_id == product.id && item.size_label() == size)
        {
            return Err(ComposeError::DuplicateCustomItem {
                product_name: product.name.clone(),
                size,
            });
        }
        self.check_capacity()?;

        let item = LineItem::custom(
            product,
            combo_name,
            category_name,
            quantity,
            dims,
            rate_override,
        );
        debug!(item_id = %item.id, product = %product.name, size = %size, "custom line item added");
        self.custom_items.push(item);
        Ok(())
    }

    /// Removes a line item and all its add-ons.
    ///
    /// No cascading effect on other items.
    pub fn remove_line_item(&mut self, id: &str) -> CoreResult<()> {
        let before = self.item_count();
        self.standard_items.retain(|item| item.id != id);
        self.custom_items.retain(|item| item.id != id);
        if self.item_count() == before {
            return Err(ComposeError::LineItemNotFound(id.to_string()));
        }
        debug!(item_id = %id, "line item removed");
        Ok(())
    }

    /// Updates a line item's quantity and recomputes its total.
    ///
    /// Non-positive or non-finite quantities are silently ignored: the
    /// document stays unchanged and `Ok` is returned.
    pub fn update_quantity(&mut self, id: &str, quantity: f64) -> CoreResult<()> {
        let item = self
            .item_mut(id)
            .ok_or_else(|| ComposeError::LineItemNotFound(id.to_string()))?;
        if !quantity.is_finite() || quantity <= 0.0 {
            debug!(item_id = %id, quantity, "ignored non-positive quantity");
            return Ok(());
        }
        item.quantity = quantity;
        item.recompute_total();
        debug!(item_id = %id, quantity, total = item.total_amount, "quantity updated");
        Ok(())
    }

    /// Updates a custom item's dimensions, size label and total.
    ///
    /// Any dimension that is missing, unparsable or non-positive leaves the
    /// item untouched. Standard items reject with [`ComposeError::NotCustom`].
    pub fn update_custom_size(&mut self, id: &str, dims: Dimensions) -> CoreResult<()> {
        let item = self
            .item_mut(id)
            .ok_or_else(|| ComposeError::LineItemNotFound(id.to_string()))?;
        if item.kind != LineItemKind::Custom {
            return Err(ComposeError::NotCustom(id.to_string()));
        }

        let positive = [&dims.length, &dims.width, &dims.thickness]
            .iter()
            .all(|d| matches!(parse_decimal(d), Some(n) if n > 0.0));
        if !positive {
            debug!(item_id = %id, "ignored non-positive dimensions");
            return Ok(());
        }

        item.dims = Some(dims);
        item.recompute_total();
        debug!(item_id = %id, size = %item.size_label(), total = item.total_amount, "size updated");
        Ok(())
    }

    // =========================================================================
    // Add-On Mutations
    // =========================================================================

    /// Attaches an add-on to a line item.
    ///
    /// Uniqueness of the add-on's product id is scoped to that parent;
    /// the same add-on product may appear under different line items.
    /// An unknown parent id is an integration bug, not user input.
    pub fn add_add_on(
        &mut self,
        parent_id: &str,
        product: &CatalogBaseProduct,
        quantity: f64,
        dims: Dimensions,
        rate_override: Option<&str>,
    ) -> CoreResult<()> {
        let parent = self
            .item_mut(parent_id)
            .ok_or_else(|| ComposeError::LineItemNotFound(parent_id.to_string()))?;
        if parent.add_ons.iter().any(|a| a.product_id == product.id) {
            return Err(ComposeError::DuplicateAddOn {
                product_name: product.name.clone(),
            });
        }

        let add_on = AddOnLineItem::from_catalog(product, quantity, dims, rate_override);
        debug!(parent_id = %parent_id, add_on_id = %add_on.id, product = %product.name, "add-on attached");
        parent.add_ons.push(add_on);
        Ok(())
    }

    /// Detaches an add-on from its parent.
    pub fn remove_add_on(&mut self, parent_id: &str, add_on_id: &str) -> CoreResult<()> {
        let parent = self
            .item_mut(parent_id)
            .ok_or_else(|| ComposeError::LineItemNotFound(parent_id.to_string()))?;
        let before = parent.add_ons.len();
        parent.add_ons.retain(|a| a.id != add_on_id);
        if parent.add_ons.len() == before {
            return Err(ComposeError::AddOnNotFound {
                parent_id: parent_id.to_string(),
                add_on_id: add_on_id.to_string(),
            });
        }
        debug!(parent_id = %parent_id, add_on_id = %add_on_id, "add-on removed");
        Ok(())
    }

    /// Updates an add-on's quantity and recomputes its total using the
    /// add-on's own geometry snapshot, not the parent's.
    pub fn update_add_on_quantity(
        &mut self,
        parent_id: &str,
        add_on_id: &str,
        quantity: f64,
    ) -> CoreResult<()> {
        let parent = self
            .item_mut(parent_id)
            .ok_or_else(|| ComposeError::LineItemNotFound(parent_id.to_string()))?;
        let add_on = parent
            .add_ons
            .iter_mut()
            .find(|a| a.id == add_on_id)
            .ok_or_else(|| ComposeError::AddOnNotFound {
                parent_id: parent_id.to_string(),
                add_on_id: add_on_id.to_string(),
            })?;
        if !quantity.is_finite() || quantity <= 0.0 {
            debug!(add_on_id = %add_on_id, quantity, "ignored non-positive add-on quantity");
            return Ok(());
        }
        add_on.quantity = quantity;
        add_on.recompute_total();
        debug!(add_on_id = %add_on_id, quantity, total = add_on.total_amount, "add-on quantity updated");
        Ok(())
    }

    // =========================================================================
    // Document Scalars
    // =========================================================================

    /// Sets the discount percent. Negative or non-finite values are ignored.
    pub fn set_discount_percent(&mut self, percent: f64) {
        if percent.is_finite() && percent >= 0.0 {
            self.discount_percent = percent;
        }
    }

    /// Sets the GST percent. Negative or non-finite values are ignored.
    pub fn set_gst_percent(&mut self, percent: f64) {
        if percent.is_finite() && percent >= 0.0 {
            self.gst_percent = percent;
        }
    }

    /// Recomputes every line item and add-on total from current state.
    ///
    /// Used after hydrating from a persisted record: stored totals are for
    /// list-page display only and are never trusted back into the engine.
    pub fn recompute_totals(&mut self) {
        for item in self
            .standard_items
            .iter_mut()
            .chain(self.custom_items.iter_mut())
        {
            item.recompute_total();
            for add_on in item.add_ons.iter_mut() {
                add_on.recompute_total();
            }
        }
    }

    fn check_capacity(&self) -> CoreResult<()> {
        if self.item_count() >= MAX_LINE_ITEMS {
            return Err(ComposeError::DocumentFull {
                max: MAX_LINE_ITEMS,
            });
        }
        Ok(())
    }
}

impl Default for EstimationDocument {
    fn default() -> Self {
        EstimationDocument::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
