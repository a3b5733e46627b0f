//! # vulcan-wire: Persisted Representation & Estimation Mapper
//!
//! The denormalized, loosely-typed shape an estimation takes in the
//! persistence API, and the bidirectional mapper between that shape and
//! the composed document in [`vulcan_core`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Host application                                                      │
//! │   ├── GET /estimations/{id} ──► EstimationRecord ──► from_persisted()  │
//! │   │                                                        │            │
//! │   │                                                        ▼            │
//! │   │                                            EstimationDocument      │
//! │   │                                            (vulcan-core, editing)  │
//! │   │                                                        │            │
//! │   └── POST /estimations ◄── EstimationRecord ◄── to_persisted()        │
//! │                                                                         │
//! │   This crate never performs the HTTP calls; it only shapes the data.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`] - The persisted record structs (string-typed figures)
//! - [`mapper`] - `from_persisted` / `to_persisted`
//! - [`coerce`] - Tolerant coercion helpers every field access goes through
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use vulcan_wire::{from_persisted, record::EstimationRecord};
//!
//! let raw = json!({
//!     "customerName": "Rayal Nuts",
//!     "products": [
//!         { "productId": "bp-1", "size": "N/A", "quantity": "2", "rate": "750" }
//!     ],
//!     "taxTotal": "16200",
//!     "totalAfterDiscount": "90000"
//! });
//! let record: EstimationRecord = serde_json::from_value(raw).unwrap();
//!
//! let doc = from_persisted(&record);
//! assert_eq!(doc.customer.first_name, "Rayal");
//! assert_eq!(doc.gst_percent, 18.0); // back-solved from the tax figures
//! assert_eq!(doc.totals().subtotal, 1500.0); // recomputed, not trusted
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod mapper;
pub mod record;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use mapper::{from_persisted, to_persisted};
pub use record::{AddOnRecord, EstimationRecord, ProductRecord};
