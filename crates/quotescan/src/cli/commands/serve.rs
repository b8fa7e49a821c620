//! Serve command implementation: the Feishu event webhook.

use anyhow::Result;
use quotescan_engine::webhook;

use crate::cli::ServeArgs;

pub async fn run(args: ServeArgs) -> Result<()> {
    webhook::run_server(args.port).await
}
