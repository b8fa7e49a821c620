//! Heuristic field extraction from OCR text.
//!
//! Turns one image's raw OCR text into a [`ProcurementRecord`] with a
//! small pile of regexes tuned for chat screenshots mixing Simplified
//! Chinese and English. Each field found bumps an additive confidence
//! score starting from a 0.50 base.

use once_cell::sync::Lazy;
use quotescan_records::ProcurementRecord;
use regex::Regex;

static PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?P<price>\d+(?:\.\d+)?)\s*(元|块)\b").unwrap(),
        Regex::new(r"￥\s*(?P<price>\d+(?:\.\d+)?)\b").unwrap(),
        Regex::new(r"RMB\s*(?P<price>\d+(?:\.\d+)?)\b").unwrap(),
    ]
});

static SPEC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\d+(?:\.\d+)?\s*(米|m|M)\b").unwrap(),
        Regex::new(r"\d+(?:\.\d+)?\s*(cm|CM|毫米|mm|MM)\b").unwrap(),
        Regex::new(r"\d+(?:\.\d+)?\s*(瓦|W|w)\b").unwrap(),
        Regex::new(r"(型号|规格|尺寸)\s*[:：]?\s*\S+").unwrap(),
    ]
});

/// Number-plus-unit span, used both to spot an inline specification and to
/// strip it back out of the item name.
static SPEC_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?\s*(米|m|cm|mm|瓦|W)\b").unwrap());

// Counting units only. Lengths like 3.4米 are specifications, not
// quantities.
static QTY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?P<qty>\d+(?:\.\d+)?)\s*(个|条|套|箱|件|只|根|卷)\b").unwrap(),
        Regex::new(r"数量\s*[:：]?\s*(?P<qty>\d+(?:\.\d+)?)\b").unwrap(),
    ]
});

/// Colloquial chatter stripped before the first line is used as a name.
const NOISE_WORDS: [&str; 8] = [
    "价格", "便宜", "要不要", "看看", "可以吗", "行不行", "怎么样", "报个价",
];

/// Extract procurement fields from one image's OCR text.
pub fn extract_procurement_fields(raw_text: &str) -> ProcurementRecord {
    let text = raw_text.trim();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut record = ProcurementRecord {
        item_name: None,
        specification: None,
        quantity: None,
        unit_price: None,
        currency: "CNY".to_string(),
        source_text: if lines.is_empty() {
            text.to_string()
        } else {
            lines.join(" ")
        },
        confidence: 0.50,
    };

    if lines.is_empty() {
        record.confidence = 0.0;
        return record;
    }

    if let Some(price) = first_capture(&lines, &PRICE_PATTERNS, "price") {
        record.unit_price = Some(price);
        record.confidence += 0.20;
    }

    if text.contains('$') || text.to_uppercase().contains("USD") {
        record.currency = "USD".to_string();
    }

    let mut specification = lines
        .iter()
        .find(|line| SPEC_PATTERNS.iter().any(|pat| pat.is_match(line)))
        .map(|line| line.to_string());
    // A leading line like 灯带3.4米 fuses the name and the measurement;
    // treat the whole line as the specification candidate.
    if specification.is_none() && SPEC_UNIT.is_match(lines[0]) {
        specification = Some(lines[0].to_string());
    }
    if let Some(spec) = specification {
        record.specification = Some(spec);
        record.confidence += 0.15;
    }

    if let Some(qty) = first_capture(&lines, &QTY_PATTERNS, "qty") {
        record.quantity = Some(qty);
        record.confidence += 0.10;
    }

    // Item name: first line with chatter and number+unit spans stripped.
    let first = lines[0];
    let mut cleaned = first.to_string();
    for word in NOISE_WORDS {
        cleaned = cleaned.replace(word, "");
    }
    let cleaned = SPEC_UNIT.replace_all(&cleaned, "");
    let cleaned = cleaned.trim_matches(|c: char| " ,，:：-—/".contains(c));
    if cleaned.is_empty() {
        record.item_name = Some(first.to_string());
        record.confidence += 0.05;
    } else {
        record.item_name = Some(cleaned.to_string());
        record.confidence += 0.15;
    }

    record.confidence = ((record.confidence * 100.0).round() / 100.0).clamp(0.0, 1.0);
    record
}

/// First parseable named capture across lines, patterns tried in order.
fn first_capture(lines: &[&str], patterns: &[Regex], group: &str) -> Option<f64> {
    for line in lines {
        for pat in patterns {
            if let Some(value) = pat
                .captures(line)
                .and_then(|caps| caps.name(group))
                .and_then(|m| m.as_str().parse::<f64>().ok())
            {
                return Some(value);
            }
        }
    }
    None
}
