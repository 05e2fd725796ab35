use crate::demo::{run_demo, run_mentors_check, DemoArgs, MentorsCheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use schoolmatch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SchoolMatch Funnel",
    about = "Run and demonstrate the quiz funnel scoring service from the command line",
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
    /// Inspect and validate mentor rosters
    Mentors {
        #[command(subcommand)]
        command: MentorsCommand,
    },
    /// Walk a canned candidate through the full funnel on the command line
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MentorsCommand {
    /// Validate a roster CSV export and flag out-of-vocabulary tags
    Check(MentorsCheckArgs),
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
        Command::Mentors {
            command: MentorsCommand::Check(args),
        } => run_mentors_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
