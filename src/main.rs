use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use unbrake::bench_file::{self, BenchSettings};
use unbrake::database::{establish_connection, get_database_url, setup_database};
use unbrake::server;
use unbrake::services::ConfigService;
use unbrake::settings::{ServerSettings, DEFAULT_DATABASE};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
        /// TOML file with a [server] table
        #[clap(short, long)]
        settings: Option<PathBuf>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Configs {
        #[clap(short, long, global = true, default_value = DEFAULT_DATABASE)]
        database: String,
        #[clap(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    List,
    Show {
        id: i32,
    },
    /// Store a bench configuration file
    Import {
        file: PathBuf,
        #[clap(short, long)]
        name: String,
        #[clap(long)]
        default: bool,
    },
    Export {
        id: i32,
        #[clap(short, long, value_enum, default_value_t = ExportFormat::Ensaio)]
        format: ExportFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Ensaio,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
            settings,
        } => {
            let base = match settings {
                Some(path) => {
                    info!("Loading settings from {}", path.display());
                    ServerSettings::load(&path)?
                }
                None => ServerSettings::default(),
            };
            let settings = base.with_overrides(port, database, cors_origin);
            info!("Starting server on port {}", settings.port);
            server::start_server(&settings).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
        Commands::Configs { database, command } => {
            let db = establish_connection(&get_database_url(Some(&database))).await?;
            setup_database(&db).await?;
            run_config_command(ConfigService::new(db), command).await?;
        }
    }

    Ok(())
}

async fn run_config_command(service: ConfigService, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::List => {
            for config in service.list().await? {
                println!(
                    "{:>4}  {:<24} {:>3} snubs  {:>3}-{:<3} km/h{}",
                    config.id,
                    config.name,
                    config.number,
                    config.inferior_limit,
                    config.upper_limit,
                    if config.is_default { "  (default)" } else { "" }
                );
            }
        }
        ConfigCommands::Show { id } => {
            let config = service.get(id).await?;
            println!("# {} '{}'", config.id, config.name);
            println!("# default: {}", config.is_default);
            println!("# created: {}", config.created_at.to_rfc3339());
            print!("{}", bench_file::render(&BenchSettings::from(&config)));
        }
        ConfigCommands::Import {
            file,
            name,
            default,
        } => {
            info!("Importing bench file {}", file.display());
            let content = std::fs::read_to_string(&file)?;
            let config = service.import(name, default, &content).await?;
            println!("Imported config {} '{}'", config.id, config.name);
        }
        ConfigCommands::Export { id, format } => match format {
            ExportFormat::Ensaio => print!("{}", service.export(id).await?),
            ExportFormat::Json => {
                let config = service.get(id).await?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
