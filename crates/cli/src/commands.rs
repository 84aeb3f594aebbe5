use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Render an INSERT request as SQL
    Render {
        #[arg(long, help = "Request file path, or `-` for stdin")]
        input: String,

        #[arg(
            long,
            help = "Target dialect (postgres, mysql, generic); overrides the request's own"
        )]
        dialect: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the statement to this file instead of stdout"
        )]
        output: Option<String>,

        #[arg(long, help = "If set, prints the SQL and its parameters as JSON")]
        json: bool,
    },
    /// Report the diagnostics of an INSERT request without rendering it
    Check {
        #[arg(long, help = "Request file path, or `-` for stdin")]
        input: String,
    },
    /// List the supported dialects
    Dialects,
}
