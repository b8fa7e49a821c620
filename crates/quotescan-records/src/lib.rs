//! Shared record types for the quotescan OCR pipeline.
//!
//! This crate defines the per-image scan results, the extracted
//! procurement records, and the Feishu wire types shared between the
//! engine and the CLI.

mod feishu;
mod record;
mod scan;

pub use feishu::*;
pub use record::*;
pub use scan::*;
