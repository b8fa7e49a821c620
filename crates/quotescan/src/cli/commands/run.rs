//! Run command implementation: the OCR batch launcher.
//!
//! Anchors itself at its own directory, reports the environment it
//! resolved, runs the batch, and closes with a fixed banner. The banner
//! is printed whether or not the batch succeeded; failures are only
//! visible through the log.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quotescan_engine::feishu::FeishuClient;
use quotescan_engine::ocr::OcrService;
use quotescan_engine::pipeline::run_batch;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::output::Output;

pub async fn run(args: RunArgs, output: &Output) -> Result<()> {
    // Anchor every relative path (models/, input_images, output/) here.
    let workdir = resolve_workdir(args.workdir.as_deref())?;
    std::env::set_current_dir(&workdir)
        .with_context(|| format!("Failed to enter {:?}", workdir))?;
    println!("Working directory: {}", workdir.display());

    let models_dir = match &args.models_dir {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
        None => workdir.join("models"),
    };
    println!("Using OCR models at: {}", models_dir.display());
    println!("Running OCR over {} ...", args.input);

    let input = PathBuf::from(shellexpand::tilde(&args.input).into_owned());
    let output_dir = PathBuf::from(shellexpand::tilde(&args.output).into_owned());

    if let Err(e) = scan_batch(&models_dir, &input, &output_dir, &args, output).await {
        warn!("OCR batch failed: {:#}", e);
    }

    for line in completion_lines(&output_dir) {
        println!("{line}");
    }

    if args.pause {
        pause_for_keypress();
    }

    Ok(())
}

/// Load the engine, run the batch, optionally push raw text upstream.
async fn scan_batch(
    models_dir: &Path,
    input: &Path,
    output_dir: &Path,
    args: &RunArgs,
    output: &Output,
) -> Result<()> {
    let ocr = OcrService::new(models_dir)?;
    let outcome = run_batch(&ocr, input, output_dir)?;
    info!("Scanned {} image(s)", outcome.scans.len());

    if output.is_json() {
        println!("{}", serde_json::to_string(&outcome.records)?);
    } else {
        for record in &outcome.records {
            output.print_record(record);
            println!();
        }
    }

    if args.upload {
        let client = FeishuClient::new(args.feishu.clone().into_config()?)?;
        for scan in &outcome.scans {
            client
                .create_record(&scan.raw_text)
                .await
                .with_context(|| format!("Failed to upload {}", scan.image))?;
        }
        info!("Uploaded {} record(s)", outcome.scans.len());
    }

    Ok(())
}

/// The launcher anchors at its own directory unless told otherwise.
fn resolve_workdir(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(shellexpand::tilde(dir).into_owned()));
    }

    let exe = std::env::current_exe().context("Failed to get executable path")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable has no parent directory")
}

/// The two closing status lines. Printed after success and failure alike.
fn completion_lines(output_dir: &Path) -> [String; 2] {
    [
        "Done! OCR batch finished.".to_string(),
        format!("Results are in {}", output_dir.display()),
    ]
}

/// Hold the terminal open until the user presses a key.
fn pause_for_keypress() {
    println!("Press Enter to exit ...");
    let mut byte = [0u8; 1];
    let _ = std::io::stdin().read(&mut byte);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workdir_defaults_to_the_executable_directory() {
        let dir = resolve_workdir(None).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(dir.as_path(), exe.parent().unwrap());
    }

    #[test]
    fn explicit_workdir_wins() {
        let dir = resolve_workdir(Some("/tmp")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn banner_does_not_depend_on_the_batch_outcome() {
        // completion_lines takes no outcome at all: the banner after a
        // failed batch is identical to the one after a clean run.
        let lines = completion_lines(Path::new("output"));
        assert_eq!(lines[0], "Done! OCR batch finished.");
        assert_eq!(lines[1], "Results are in output");
    }
}
