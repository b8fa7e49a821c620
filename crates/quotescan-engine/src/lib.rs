//! OCR batch pipeline engine for quotescan.
//!
//! This crate turns a folder of procurement-quote screenshots into
//! structured records: image collection, text recognition, field
//! extraction, artifact export, and the Feishu integrations.

pub mod export;
pub mod extract;
pub mod feishu;
pub mod images;
pub mod ocr;
pub mod pipeline;
pub mod webhook;

pub use ocr::OcrService;
pub use pipeline::{run_batch, BatchOutcome, ScanError};
