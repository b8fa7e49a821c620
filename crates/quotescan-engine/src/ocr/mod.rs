//! OCR (Optical Character Recognition) module.
//!
//! Wraps the ocrs library for text detection and recognition on image
//! files. OCR inference itself is entirely the library's business.

mod engine;

pub use engine::OcrService;
