//! Todo API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todo_api::api::{self, Config, ServerError};
use todo_api::db::{Database, DbError, SqliteDatabase};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todo_api::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(todo_api::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(todo_api::binary::api))]
    Server(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(author, version, about = "Todo and contact API server", long_about = None)]
struct Cli {
    /// Host address to bind to (env: TODO_API_HOST, default 0.0.0.0)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (env: TODO_API_PORT, default 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path (env: TODO_API_DB, default todo.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(db) = self.db {
            config = config.with_db_path(db);
        }
        config
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    serve(Cli::parse().into_config()).await?;
    Ok(())
}

async fn serve(config: Config) -> Result<(), BinaryError> {
    println!("Opening database at {:?}", config.db_path);

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = SqliteDatabase::open(&config.db_path).await?;

    db.migrate().await?;
    println!("Database migrations complete");

    api::run(config, db).await?;

    Ok(())
}
