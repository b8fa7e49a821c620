//! Per-image OCR scan results.

use serde::{Deserialize, Serialize};

/// A recognized line of text with its position on the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrLine {
    /// Recognized text.
    pub text: String,

    /// Left edge in pixels.
    pub x: i32,

    /// Top edge in pixels.
    pub y: i32,

    /// Line width in pixels.
    pub width: i32,

    /// Line height in pixels.
    pub height: i32,
}

/// OCR output for a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageScan {
    /// Image file name.
    pub image: String,

    /// Path the image was read from.
    pub path: String,

    /// All recognized line texts joined with newlines.
    pub raw_text: String,

    /// Recognized lines in reading order.
    pub lines: Vec<OcrLine>,
}

impl ImageScan {
    /// Assemble a scan from recognized lines, deriving `raw_text`.
    pub fn from_lines(image: String, path: String, lines: Vec<OcrLine>) -> Self {
        let raw_text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            image,
            path,
            raw_text,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> OcrLine {
        OcrLine {
            text: text.to_string(),
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn raw_text_joins_lines_in_order() {
        let scan = ImageScan::from_lines(
            "a.png".to_string(),
            "input_images/a.png".to_string(),
            vec![line("灯带3.4米"), line("3.8元")],
        );
        assert_eq!(scan.raw_text, "灯带3.4米\n3.8元");
    }

    #[test]
    fn raw_text_is_empty_without_lines() {
        let scan = ImageScan::from_lines("a.png".to_string(), "a.png".to_string(), Vec::new());
        assert_eq!(scan.raw_text, "");
    }
}
