use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dramascore::cli::{UserCommands, run_info, run_recompute, run_user_add, run_user_list};
use dramascore::config::{DB_FILE_NAME, ServerConfig};
use dramascore::server::{AppState, create_router};
use dramascore::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "dramascore")]
#[command(about = "Script scoring and ranking service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and database schema
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Start the server
    Serve {
        /// TOML config file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to [default: 127.0.0.1]
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to [default: 8080]
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database [default: ./data]
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Manage raters
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Recompute cached script aggregates from the ratings
    Recompute {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Only this script (code or numeric id)
        #[arg(long)]
        script: Option<String>,
    },

    /// Show database statistics
    Info {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_init(data_dir: String) -> anyhow::Result<()> {
    let data_path: PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let db_path = data_path.join(DB_FILE_NAME);
    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    println!("Initialized database at {}", db_path.display());

    Ok(())
}

async fn run_serve(
    config_file: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<String>,
) -> anyhow::Result<()> {
    let mut config = match config_file {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir.into();
    }

    let db_path = config.db_path();
    if !db_path.exists() {
        bail!(
            "Database not found at {}. Run 'dramascore init' first.",
            db_path.display()
        );
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(Arc::new(store), config));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dramascore=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => run_init(data_dir)?,
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
        } => run_serve(config, host, port, data_dir).await?,
        Commands::User { command } => match command {
            UserCommands::Add {
                data_dir,
                id,
                name,
                role,
                role_type,
                department,
            } => run_user_add(data_dir, id, name, role, role_type, department)?,
            UserCommands::List { data_dir, json } => run_user_list(data_dir, json)?,
        },
        Commands::Recompute { data_dir, script } => run_recompute(data_dir, script)?,
        Commands::Info { data_dir, json } => run_info(data_dir, json)?,
    }

    Ok(())
}
