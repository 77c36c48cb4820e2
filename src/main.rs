use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ragkeeper::{run_server, Commands, Container, ContainerConfig};

#[derive(Parser)]
#[command(name = "ragkeeper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Filesystem location of the persistent vector store
    #[arg(short, long, global = true, default_value = "~/.ragkeeper/chroma_db")]
    store_path: String,

    /// Python interpreter used to run the vector store helpers
    #[arg(long, global = true, default_value = "python3")]
    python: String,

    /// Use an in-memory vector store instead of ChromaDB
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Keep timestamped state-file backups before overwriting
    #[arg(long, global = true)]
    state_backups: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store_path = PathBuf::from(expand_tilde(&cli.store_path));

    let token_file = match &cli.command {
        Commands::Serve { token_file, .. } => token_file.clone(),
        _ => None,
    };

    let container = Arc::new(
        Container::new(ContainerConfig {
            store_path,
            python: cli.python.clone(),
            memory_storage: cli.memory_storage,
            state_backups: cli.state_backups,
            token_file,
        })
        .await?,
    );

    match cli.command {
        Commands::Serve { bind, .. } => {
            run_server(container, &bind).await?;
        }

        Commands::Documents {
            collection,
            project,
        } => {
            let collection = container.collection(&collection, None)?;
            let documents = container
                .list_documents_use_case()
                .execute(&collection, project.as_deref())
                .await?;

            if documents.is_empty() {
                println!("No documents found.");
            } else {
                println!("Found {} documents:\n", documents.len());
                for doc in documents {
                    match doc.metadata_str("source") {
                        Some(source) => println!("  {} ({})", doc.id(), source),
                        None => println!("  {}", doc.id()),
                    }
                }
            }
        }

        Commands::State { collection } => {
            let collection = container.collection(&collection, None)?;
            match container.state_store().load(&collection).await? {
                Some(state) => {
                    println!("State file: {}", collection.state_file_path().display());
                    println!("Shape: {}", state.shape_name());
                    println!("Projects ({}):", state.len());
                    for repo in state.repos() {
                        println!("  {}", repo);
                    }
                }
                None => println!("No state file for collection '{}'.", collection.name()),
            }
        }

        Commands::DeleteDocument { collection, id } => {
            let collection = container.collection(&collection, None)?;
            let deleted = container
                .delete_document_use_case()
                .execute(&collection, &id)
                .await?;
            println!("Document deleted ({} removed).", deleted);
        }

        Commands::DeleteFolder {
            collection,
            project,
            folder,
        } => {
            let collection = container.collection(&collection, None)?;
            let deleted = container
                .delete_folder_use_case()
                .execute(&collection, &project, &folder)
                .await?;
            println!("Deleted {} documents under '{}'.", deleted, folder);
        }

        Commands::DeleteProject {
            collection,
            project,
        } => {
            let collection = container.collection(&collection, None)?;
            let deleted = container
                .delete_project_use_case()
                .execute(&collection, &project)
                .await?;
            println!("Deleted {} documents for project '{}'.", deleted, project);
        }

        Commands::ClearCollection { collection } => {
            let collection_ref = container.collection(&collection, None)?;
            let deleted = container
                .clear_collection_use_case()
                .execute(&collection_ref)
                .await?;
            println!(
                "Collection '{}' cleared ({} documents dropped).",
                collection, deleted
            );
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
