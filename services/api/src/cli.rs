use crate::quote::{run_quote, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use squeegee::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Squeegee Samurai",
    about = "Run the Squeegee Samurai estimate service or price a quote from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a quote locally and print the breakdown
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["squeegee-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn quote_accepts_repeated_services() {
        let cli = Cli::try_parse_from([
            "squeegee-api",
            "quote",
            "--property-type",
            "Commercial",
            "--service-type",
            "Weekly Exterior",
            "--windows",
            "12",
            "--service",
            "First-Time Uplift",
            "--service",
            "High Traffic",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.windows, 12);
                assert_eq!(args.services.len(), 2);
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }
}
