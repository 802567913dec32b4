use crate::cli::opt::Export;
use anyhow::Error;
use kimyo_client::{ContentApi, ContentClient};

pub(crate) async fn export(client: &ContentClient, opt: Export) -> Result<(), Error> {
    let snapshot = client.content_snapshot().await?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    match opt.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "wrote {} module(s) to {}",
                snapshot.total_modules,
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
