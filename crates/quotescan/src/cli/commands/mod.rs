//! Command implementations.

use std::io::Read;

use anyhow::{Context, Result};

pub mod extract;
pub mod run;
pub mod serve;
pub mod upload;

/// Take raw text from the argument, a file, or stdin, in that order.
pub(crate) fn read_text(arg: Option<String>, file: Option<&str>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }

    if let Some(path) = file {
        let path = shellexpand::tilde(path).into_owned();
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_text_wins_over_file() {
        let text = read_text(Some("直接文本".to_string()), Some("/nonexistent")).unwrap();
        assert_eq!(text, "直接文本");
    }

    #[test]
    fn file_text_is_read_when_no_argument() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.txt");
        std::fs::write(&path, "灯带 3.4 米").unwrap();

        let text = read_text(None, path.to_str()).unwrap();
        assert_eq!(text, "灯带 3.4 米");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_text(None, Some("/no/such/file.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }
}
