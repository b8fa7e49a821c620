//! Batch OCR pipeline: collect, scan, extract, export.

use std::path::{Path, PathBuf};

use anyhow::Result;
use quotescan_records::{ImageScan, ProcurementRecord};
use thiserror::Error;
use tracing::info;

use crate::export::{export_csv, export_json};
use crate::extract::extract_procurement_fields;
use crate::images::collect_images;
use crate::ocr::OcrService;

/// Errors raised while assembling a batch.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No recognizable images under {0:?}")]
    NoImages(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a finished batch produced.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-image scan results.
    pub scans: Vec<ImageScan>,

    /// One extracted record per image.
    pub records: Vec<ProcurementRecord>,

    /// Path of the JSON artifact.
    pub json_path: PathBuf,

    /// Path of the CSV artifact, when any records were extracted.
    pub csv_path: Option<PathBuf>,
}

/// Run the OCR batch over `input` and write artifacts under `output_dir`.
pub fn run_batch(ocr: &OcrService, input: &Path, output_dir: &Path) -> Result<BatchOutcome> {
    let images = prepare_inputs(input)?;

    let mut scans = Vec::with_capacity(images.len());
    let mut records = Vec::with_capacity(images.len());

    for image in &images {
        info!("OCR: {:?}", image);
        let scan = ocr.scan_file(image)?;
        records.push(extract_procurement_fields(&scan.raw_text));
        scans.push(scan);
    }

    let json_path = export_json(&scans, output_dir)?;
    let csv_path = export_csv(&records, output_dir)?;

    Ok(BatchOutcome {
        scans,
        records,
        json_path,
        csv_path,
    })
}

fn prepare_inputs(input: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let images = collect_images(input)?;
    if images.is_empty() {
        return Err(ScanError::NoImages(input.to_path_buf()));
    }
    Ok(images)
}
