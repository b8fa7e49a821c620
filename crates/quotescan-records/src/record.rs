//! Extracted procurement fields.

use serde::{Deserialize, Serialize};

/// Structured procurement fields extracted from one image's OCR text.
///
/// Every field except `currency`, `source_text` and `confidence` is
/// optional: quote screenshots rarely spell out all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementRecord {
    /// Item / material name.
    pub item_name: Option<String>,

    /// Specification, kept in the seller's own wording.
    pub specification: Option<String>,

    /// Quantity in countable units (not lengths).
    pub quantity: Option<f64>,

    /// Unit price.
    pub unit_price: Option<f64>,

    /// Currency code; `CNY` unless the text says otherwise.
    pub currency: String,

    /// The OCR text the fields were extracted from, joined to one line.
    pub source_text: String,

    /// Heuristic extraction confidence in [0, 1].
    pub confidence: f64,
}
