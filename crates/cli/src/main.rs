use crate::{error::CliError, output::RenderedStatement, request::InsertRequest};
use clap::Parser;
use commands::Commands;
use planner::query::dialect::DialectKind;
use std::str::FromStr;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod request;

#[derive(Parser)]
#[command(name = "dmlq", version = "0.1.0", about = "INSERT statement renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            dialect,
            output,
            json,
        } => {
            let request = load_request(&input).await?;
            let kind = match dialect {
                Some(name) => DialectKind::from_str(&name).map_err(CliError::InvalidDialect)?,
                None => request.dialect.unwrap_or_default(),
            };
            let dialect = kind.dialect();

            let (sql, params) = request.into_builder()?.to_sql(dialect.as_ref())?;
            let statement = RenderedStatement {
                dialect: dialect.name(),
                sql,
                params,
            };

            match output {
                Some(path) => {
                    output::write_statement(&statement, &path, json).await?;
                    info!("Wrote {} statement to {}", kind, path);
                }
                None => output::print_statement(&statement, json)?,
            }
        }
        Commands::Check { input } => {
            let builder = load_request(&input).await?.into_builder()?;
            if builder.is_valid() {
                println!("OK");
            } else {
                for diagnostic in builder.diagnostics() {
                    println!("{diagnostic}");
                }
                return Err(CliError::Diagnostics(builder.diagnostics().len()));
            }
        }
        Commands::Dialects => {
            for kind in DialectKind::ALL {
                println!("{:<10} {}", kind.to_string(), kind.dialect().name());
            }
        }
    }

    Ok(())
}

async fn load_request(path: &str) -> Result<InsertRequest, CliError> {
    let source = if path == "-" {
        let mut source = String::new();
        tokio::io::stdin().read_to_string(&mut source).await?;
        source
    } else {
        tokio::fs::read_to_string(path).await?
    };
    InsertRequest::from_json(&source)
}
