use clap::{Parser, Subcommand};
use kimyo_model::{ColorToken, Grade};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "kimyo", about = "Admin CLI for the kimyo course backend")]
pub(crate) struct Cli {
    /// Directory the API scripts live in, with a trailing slash,
    /// e.g. https://example.org/api/
    #[arg(long, env = "KIMYO_ENDPOINT")]
    pub(crate) endpoint: Url,

    /// Where the last-selection hint is stored.
    #[arg(long, env = "KIMYO_STATE_FILE", default_value = ".kimyo/selection.json")]
    pub(crate) state_file: PathBuf,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long)]
    pub(crate) assume_yes: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Manage the modules of one grade.
    Modules(Modules),

    /// Manage the topics of one module.
    Topics(Topics),

    /// Dump the full course tree as JSON.
    Export(Export),
}

#[derive(Debug, Parser)]
pub(crate) struct Modules {
    /// Grade level, 10 or 11.
    #[arg(short, long)]
    pub(crate) grade: Grade,

    #[command(subcommand)]
    pub(crate) action: ModuleAction,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ModuleAction {
    List {
        /// Case-insensitive substring filter on slug and title.
        #[arg(long)]
        filter: Option<String>,
    },
    Add(AddModule),
    Edit(EditModule),
    Delete {
        id: i64,
    },
}

#[derive(Debug, Parser)]
pub(crate) struct AddModule {
    #[arg(long)]
    pub(crate) slug: String,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long)]
    pub(crate) icon: Option<String>,
    #[arg(long)]
    pub(crate) color: Option<ColorToken>,
    /// Create the module hidden from students.
    #[arg(long)]
    pub(crate) inactive: bool,
}

#[derive(Debug, Parser)]
pub(crate) struct EditModule {
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// An empty string clears the description.
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long)]
    pub(crate) icon: Option<String>,
    #[arg(long)]
    pub(crate) color: Option<ColorToken>,
    #[arg(long)]
    pub(crate) active: Option<bool>,
    /// Topic ids to delete together with this save.
    #[arg(long = "drop-topic")]
    pub(crate) drop_topics: Vec<i64>,
}

#[derive(Debug, Parser)]
pub(crate) struct Topics {
    /// Slug of the owning module.
    #[arg(short, long)]
    pub(crate) module: String,

    #[command(subcommand)]
    pub(crate) action: TopicAction,
}

#[derive(Debug, Subcommand)]
pub(crate) enum TopicAction {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Edit(EditTopic),
    Delete {
        id: i64,
    },
}

#[derive(Debug, Parser)]
pub(crate) struct EditTopic {
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) title: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Raw position within the module; siblings are not renumbered.
    #[arg(long)]
    pub(crate) order: Option<i64>,
    /// Replace the body with the block document in this JSON file.
    #[arg(long)]
    pub(crate) content_file: Option<PathBuf>,
    /// Upload an image and append it to the body.
    #[arg(long)]
    pub(crate) attach_image: Option<PathBuf>,
    /// Caption for an attached image.
    #[arg(long, default_value = "")]
    pub(crate) caption: String,
}

#[derive(Debug, Parser)]
pub(crate) struct Export {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}
