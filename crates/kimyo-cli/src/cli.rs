pub(crate) mod opt;

mod export;
mod modules;
mod prompt;
mod topics;

use crate::cli::opt::{Cli, Commands};
use anyhow::Error;
use kimyo_client::{Config, ContentClient};
use kimyo_cms::SelectionFile;

pub(crate) async fn exec(cli: Cli) -> Result<(), Error> {
    let client = ContentClient::new(Config::new(cli.endpoint));
    let selection = SelectionFile::new(cli.state_file);

    match cli.command {
        Commands::Modules(o) => modules::modules(&client, &selection, o, cli.assume_yes).await,
        Commands::Topics(o) => topics::topics(&client, &selection, o, cli.assume_yes).await,
        Commands::Export(o) => export::export(&client, o).await,
    }
}
