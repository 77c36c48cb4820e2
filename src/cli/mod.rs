use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8080
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,

        /// JSON file mapping session tokens to account emails
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// List documents in a collection
    Documents {
        collection: String,

        /// Only show documents belonging to this project
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Show the processed-repositories state of a collection
    State {
        collection: String,
    },

    DeleteDocument {
        collection: String,
        id: String,
    },

    DeleteFolder {
        collection: String,
        project: String,
        folder: String,
    },

    DeleteProject {
        collection: String,
        project: String,
    },

    /// Drop a whole collection together with its state files
    ClearCollection {
        collection: String,
    },
}
