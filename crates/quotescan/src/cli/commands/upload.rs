//! Upload command implementation.

use anyhow::Result;
use quotescan_engine::feishu::FeishuClient;

use crate::cli::UploadArgs;
use crate::output::Output;

pub async fn run(args: UploadArgs, output: &Output) -> Result<()> {
    let text = super::read_text(args.text, args.file.as_deref())?;

    let client = FeishuClient::new(args.feishu.into_config()?)?;
    let data = client.create_record(&text).await?;

    if output.is_json() {
        println!("{}", serde_json::json!({ "success": true, "data": data }));
    } else {
        println!("Record created");
    }

    Ok(())
}
