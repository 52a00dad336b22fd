use crate::console::{
    run_ask, run_job, run_languages, run_profile, run_roadmaps, run_search, run_signup,
    run_stories, AskArgs, JobArgs, LanguageArgs, ProfileArgs, RoadmapArgs, SearchArgs,
    SignupArgs, StoriesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use career_nirvana::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Career Nirvana",
    about = "Serve the Career Nirvana frontend tier or explore careers from the command line",
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
    /// Search the career story catalog
    Search(SearchArgs),
    /// Show career roadmaps
    Roadmaps(RoadmapArgs),
    /// List career stories from the backend
    Stories(StoriesArgs),
    /// Show the details of one career
    Job(JobArgs),
    /// Ask the AI counsellor about a career
    Ask(AskArgs),
    /// Walk through the five-step signup wizard
    Signup(SignupArgs),
    /// Show or forget the signed-up profile
    Profile(ProfileArgs),
    /// List the interface languages
    Languages(LanguageArgs),
}

/// Selects which career backend a command talks to.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct BackendArgs {
    /// Override the configured backend base URL
    #[arg(long)]
    pub(crate) api_base_url: Option<String>,
    /// Use the built-in in-memory backend instead of the HTTP API
    #[arg(long)]
    pub(crate) mock_backend: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Replace the built-in story catalog with a CSV export
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Roadmaps(args) => run_roadmaps(args),
        Command::Stories(args) => run_stories(args).await,
        Command::Job(args) => run_job(args).await,
        Command::Ask(args) => run_ask(args).await,
        Command::Signup(args) => run_signup(args).await,
        Command::Profile(args) => run_profile(args).await,
        Command::Languages(args) => run_languages(args),
    }
}
