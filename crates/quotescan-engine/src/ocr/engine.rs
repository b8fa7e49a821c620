//! OCR engine wrapper using the ocrs library.

use std::path::Path;

use anyhow::{Context, Result};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use quotescan_records::{ImageScan, OcrLine};
use rten::Model;
use tracing::{debug, trace};

/// OCR service for reading text off quote screenshots.
pub struct OcrService {
    engine: OcrEngine,
}

impl OcrService {
    /// Create a new OCR service by loading models from the given directory.
    ///
    /// Expects `text-detection.rten` and `text-recognition.rten` inside
    /// `models_dir`.
    pub fn new(models_dir: &Path) -> Result<Self> {
        let detection_path = models_dir.join("text-detection.rten");
        let recognition_path = models_dir.join("text-recognition.rten");

        debug!("Loading OCR detection model from {:?}", detection_path);
        let detection_model = Model::load_file(&detection_path)
            .with_context(|| format!("Failed to load detection model from {:?}", detection_path))?;

        debug!("Loading OCR recognition model from {:?}", recognition_path);
        let recognition_model = Model::load_file(&recognition_path).with_context(|| {
            format!(
                "Failed to load recognition model from {:?}",
                recognition_path
            )
        })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .context("Failed to create OCR engine")?;

        debug!("OCR engine initialized");
        Ok(Self { engine })
    }

    /// Scan one image file into per-line text plus positions.
    pub fn scan_file(&self, path: &Path) -> Result<ImageScan> {
        let img = image::open(path)
            .with_context(|| format!("Failed to read image {:?}", path))?
            .into_rgb8();

        let lines = self.recognize(&img)?;

        let image_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(ImageScan::from_lines(
            image_name,
            path.display().to_string(),
            lines,
        ))
    }

    /// Run detection and recognition over a decoded RGB image.
    fn recognize(&self, img: &image::RgbImage) -> Result<Vec<OcrLine>> {
        let (width, height) = (img.width(), img.height());
        trace!("Image loaded: {}x{}", width, height);

        let img_source = ImageSource::from_bytes(img.as_raw(), (width, height))
            .context("Failed to create image source")?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .context("Failed to prepare OCR input")?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .context("Failed to detect words")?;
        trace!("Detected {} word regions", word_rects.len());

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .context("Failed to recognize text")?;

        let mut lines = Vec::new();
        for line in line_texts.iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }

            let words: Vec<_> = line.words().collect();
            if words.is_empty() {
                continue;
            }

            // Line box is the union of its word boxes.
            let mut left = i32::MAX;
            let mut top = i32::MAX;
            let mut right = i32::MIN;
            let mut bottom = i32::MIN;

            for word in &words {
                let rect = word.bounding_rect();
                left = left.min(rect.left() as i32);
                top = top.min(rect.top() as i32);
                right = right.max((rect.left() + rect.width()) as i32);
                bottom = bottom.max((rect.top() + rect.height()) as i32);
            }

            lines.push(OcrLine {
                text,
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            });
        }

        debug!("Recognized {} text lines", lines.len());
        Ok(lines)
    }
}
