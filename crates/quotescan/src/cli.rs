//! CLI command definitions using clap.

use anyhow::Context;
use clap::{Parser, Subcommand};
use quotescan_engine::feishu::FeishuConfig;

pub mod commands;

/// OCR procurement-quote screenshots into structured records.
#[derive(Parser)]
#[command(name = "quotescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format for automation
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the OCR batch over a folder of images
    Run(RunArgs),

    /// Extract procurement fields from raw text
    Extract(ExtractArgs),

    /// Upload raw text as a new Bitable record
    Upload(UploadArgs),

    /// Serve the Feishu event webhook
    Serve(ServeArgs),
}

/// Run command arguments.
#[derive(Parser)]
pub struct RunArgs {
    /// Image file or folder to scan
    #[arg(default_value = "input_images")]
    pub input: String,

    /// Folder the artifacts are written to
    #[arg(long, short = 'o', default_value = "output")]
    pub output: String,

    /// OCR model directory (default: models/ in the working directory)
    #[arg(long, env = "QUOTESCAN_MODELS_DIR")]
    pub models_dir: Option<String>,

    /// Working directory (default: the executable's directory)
    #[arg(long)]
    pub workdir: Option<String>,

    /// Also push each image's raw text to the configured Bitable
    #[arg(long)]
    pub upload: bool,

    /// Wait for a keypress before exiting
    #[arg(long)]
    pub pause: bool,

    #[command(flatten)]
    pub feishu: FeishuArgs,
}

/// Extract command arguments.
#[derive(Parser)]
pub struct ExtractArgs {
    /// Raw text to extract from (stdin when neither this nor --file is given)
    pub text: Option<String>,

    /// Read raw text from a file
    #[arg(long, short = 'f')]
    pub file: Option<String>,
}

/// Upload command arguments.
#[derive(Parser)]
pub struct UploadArgs {
    /// Raw text to upload (stdin when neither this nor --file is given)
    pub text: Option<String>,

    /// Read raw text from a file
    #[arg(long, short = 'f')]
    pub file: Option<String>,

    #[command(flatten)]
    pub feishu: FeishuArgs,
}

/// Serve command arguments.
#[derive(Parser)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', default_value = "3000")]
    pub port: u16,
}

/// Feishu connection arguments (flags or FEISHU_* environment).
#[derive(Parser, Clone)]
pub struct FeishuArgs {
    /// Feishu app id
    #[arg(long, env = "FEISHU_APP_ID", hide_env_values = true)]
    pub app_id: Option<String>,

    /// Feishu app secret
    #[arg(long, env = "FEISHU_APP_SECRET", hide_env_values = true)]
    pub app_secret: Option<String>,

    /// Bitable app token (Base ID)
    #[arg(long, env = "FEISHU_BASE_APP_TOKEN")]
    pub base_app_token: Option<String>,

    /// Bitable table id
    #[arg(long, env = "FEISHU_TABLE_ID")]
    pub table_id: Option<String>,

    /// Name of the raw-text column, exactly as the table spells it
    #[arg(long, env = "FEISHU_RAW_TEXT_FIELD")]
    pub raw_text_field: Option<String>,
}

impl FeishuArgs {
    /// Resolve into a full config, erroring on the first missing value.
    pub fn into_config(self) -> anyhow::Result<FeishuConfig> {
        Ok(FeishuConfig {
            app_id: self.app_id.context("FEISHU_APP_ID is not set")?,
            app_secret: self.app_secret.context("FEISHU_APP_SECRET is not set")?,
            base_app_token: self
                .base_app_token
                .context("FEISHU_BASE_APP_TOKEN is not set")?,
            table_id: self.table_id.context("FEISHU_TABLE_ID is not set")?,
            raw_text_field: self
                .raw_text_field
                .context("FEISHU_RAW_TEXT_FIELD is not set")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_to_the_conventional_folders() {
        let cli = Cli::try_parse_from(["quotescan", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.input, "input_images");
                assert_eq!(args.output, "output");
                assert!(!args.pause);
                assert!(!args.upload);
                assert!(args.workdir.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn serve_defaults_to_port_3000() {
        let cli = Cli::try_parse_from(["quotescan", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, 3000),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn missing_feishu_config_is_reported_by_name() {
        let args = FeishuArgs {
            app_id: Some("cli_x".to_string()),
            app_secret: None,
            base_app_token: None,
            table_id: None,
            raw_text_field: None,
        };
        let err = args.into_config().unwrap_err();
        assert!(err.to_string().contains("FEISHU_APP_SECRET"));
    }
}
