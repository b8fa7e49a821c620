//! Output formatting for CLI responses.

use quotescan_records::ProcurementRecord;

/// Output formatter.
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output formatter.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Whether JSON output is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print one extracted record.
    pub fn print_record(&self, record: &ProcurementRecord) {
        if self.json {
            println!("{}", serde_json::to_string(record).unwrap());
        } else {
            println!("Item:          {}", record.item_name.as_deref().unwrap_or("-"));
            println!(
                "Specification: {}",
                record.specification.as_deref().unwrap_or("-")
            );
            println!("Quantity:      {}", fmt_number(record.quantity));
            println!("Unit price:    {}", fmt_number(record.unit_price));
            println!("Currency:      {}", record.currency);
            println!("Confidence:    {:.2}", record.confidence);
        }
    }
}

fn fmt_number(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
