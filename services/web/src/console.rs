use crate::cli::BackendArgs;
use crate::infra::InMemoryBackend;
use career_nirvana::backend::{BackendError, CareerBackend, Conversation, HttpBackend, SUGGESTED_QUESTIONS};
use career_nirvana::config::{AppConfig, BackendConfig, ConfigError};
use career_nirvana::discovery::{
    featured, filter_videos, highlight, search, thumbnail_for, CatalogImporter,
    PanelState, RoadmapGallery, SearchOutcome, Segment, StoryCard, StoryCatalog,
    NO_RESULT_HINTS, POPULAR_SEARCHES,
};
use career_nirvana::error::AppError;
use career_nirvana::session::{DisplayPreferences, Language, SessionContext, SessionStore};
use career_nirvana::signup::{
    Destination, FieldOfStudy, Goal, Interest, Navigator, Retreat, SignupFlow, Status,
    SubmissionOutcome, WizardStep,
};
use career_nirvana::telemetry;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Text to look for in titles, categories, and tags
    pub(crate) query: String,
    /// Search a CSV catalog export instead of the built-in stories
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the matches as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RoadmapArgs {
    /// Show a single roadmap by title
    #[arg(long)]
    pub(crate) title: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StoriesArgs {
    /// Only list stories whose title or description contains this text
    #[arg(long)]
    pub(crate) filter: Option<String>,
    /// Only list the stories featured on the home page
    #[arg(long)]
    pub(crate) featured: bool,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

#[derive(Args, Debug)]
pub(crate) struct JobArgs {
    /// Career identifier, for example `golgappa_seller`
    pub(crate) job_id: String,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Career identifier, for example `baker`
    pub(crate) job_id: String,
    /// Question to ask; omit to pick from the suggested questions
    pub(crate) question: Option<String>,
    /// Use suggested question N (1-3) instead of typing one
    #[arg(
        long,
        conflicts_with = "question",
        value_parser = clap::value_parser!(u8).range(1..=3)
    )]
    pub(crate) suggested: Option<u8>,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfileArgs {
    /// Forget the stored profile identifier
    #[arg(long)]
    pub(crate) forget: bool,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SignupArgs {
    /// Interface language for this signup, overriding APP_LANGUAGE
    #[arg(long)]
    pub(crate) language: Option<String>,
    #[command(flatten)]
    pub(crate) backend: BackendArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LanguageArgs {
    /// Select a language by code, overriding APP_LANGUAGE
    #[arg(long)]
    pub(crate) language: Option<String>,
}

/// Loads configuration for one-shot commands and applies backend overrides.
fn command_config(args: &BackendArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init_for_cli()?;

    if let Some(base_url) = args.api_base_url.clone() {
        config.backend = BackendConfig::new(base_url, config.backend.timeout.as_secs())?;
    }
    Ok(config)
}

fn connect(config: &AppConfig, args: &BackendArgs) -> Result<Arc<dyn CareerBackend>, AppError> {
    if args.mock_backend {
        Ok(Arc::new(InMemoryBackend::default()))
    } else {
        Ok(Arc::new(HttpBackend::new(&config.backend)?))
    }
}

/// Session state for one command. `language` overrides the configured selection.
pub(crate) fn session_context(
    config: &AppConfig,
    language: Option<&str>,
) -> Result<SessionContext, AppError> {
    let mut session = SessionContext::new(DisplayPreferences {
        language: config.session.language,
    });
    if let Some(code) = language {
        let language = Language::from_code(code).ok_or_else(|| ConfigError::UnknownLanguage {
            code: code.to_string(),
        })?;
        session.select_language(language);
    }
    Ok(session)
}

pub(crate) fn search_json(outcome: &SearchOutcome<'_>) -> Result<String, AppError> {
    let payload = json!({
        "query": outcome.query(),
        "panel": outcome.panel(),
        "summary": outcome.summary(),
        "results": outcome.records(),
    });
    serde_json::to_string_pretty(&payload).map_err(|err| AppError::Io(err.into()))
}

/// Renders highlighted segments with matches wrapped in brackets.
pub(crate) fn render_segments(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.to_string(),
            Segment::Match(text) => format!("[{text}]"),
        })
        .collect()
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    telemetry::init_for_cli()?;
    let catalog = match &args.catalog {
        Some(path) => CatalogImporter::from_path(path)?,
        None => StoryCatalog::standard(),
    };

    let outcome = search(&args.query, &catalog);
    let needle = outcome.query().unwrap_or_default();

    if args.json {
        println!("{}", search_json(&outcome)?);
        return Ok(());
    }

    match outcome.panel() {
        PanelState::Hidden => {
            println!("Popular searches: {}", POPULAR_SEARCHES.join(", "));
        }
        PanelState::NoResults => {
            println!("No career stories found for \"{}\".", args.query.trim());
            println!("Try searching for: {}", NO_RESULT_HINTS.join(", "));
        }
        PanelState::Results(_) => {
            println!("{}", outcome.summary().unwrap_or_default());
            for record in outcome.records() {
                println!(
                    "- {} | {} ({}, {})",
                    render_segments(&highlight(&record.display_name, needle)),
                    render_segments(&highlight(&record.title, needle)),
                    record.location,
                    record.income_range
                );
                println!("  {} · {}", record.category, record.duration_label);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_roadmaps(args: RoadmapArgs) -> Result<(), AppError> {
    telemetry::init_for_cli()?;
    let gallery = RoadmapGallery::standard();

    let roadmaps: Vec<_> = match &args.title {
        Some(title) => {
            let roadmap = gallery
                .find(title)
                .ok_or_else(|| AppError::NotFound(format!("no roadmap titled \"{title}\"")))?;
            vec![roadmap]
        }
        None => gallery.roadmaps().iter().collect(),
    };

    for roadmap in roadmaps {
        println!("{}", roadmap.title);
        println!(
            "  Time to start: {} | Initial cost: {} | Average income: {}",
            roadmap.time_to_start, roadmap.initial_cost, roadmap.average_income
        );
        for (index, step) in roadmap.steps.iter().enumerate() {
            println!("  {}. {}", index + 1, step);
        }
        println!("  Skills: {}", roadmap.skills.join(", "));
    }
    Ok(())
}

fn print_cards(cards: &[StoryCard]) {
    if cards.is_empty() {
        println!("No career stories match.");
    }
    for card in cards {
        println!("- {} ({})", card.title, card.id);
        println!("  {}", card.short_description);
        println!("  thumbnail: {}", card.thumbnail);
    }
}

pub(crate) async fn run_stories(args: StoriesArgs) -> Result<(), AppError> {
    let config = command_config(&args.backend)?;
    let backend = connect(&config, &args.backend)?;

    let videos = backend.list_videos().await?;
    let cards = if args.featured {
        featured(&videos)
    } else {
        filter_videos(&videos, args.filter.as_deref().unwrap_or_default())
    };
    print_cards(&cards);
    Ok(())
}

pub(crate) async fn run_job(args: JobArgs) -> Result<(), AppError> {
    let config = command_config(&args.backend)?;
    let backend = connect(&config, &args.backend)?;

    let job = match backend.get_job(&args.job_id).await {
        Ok(job) => job,
        Err(BackendError::NotFound { .. }) => {
            return Err(AppError::NotFound("Career not found.".to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    println!("{} ({})", job.title, thumbnail_for(&job.id));
    println!("{}", job.description);
    println!("Qualification: {}", job.qualification);
    println!("Skills: {}", job.skills.join(", "));
    println!("Earning: {} | Investment: {}", job.earning, job.investment);
    println!("Pros: {}", job.pros.join("; "));
    println!("Cons: {}", job.cons.join("; "));
    println!("Growth: {}", job.growth);
    Ok(())
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let config = command_config(&args.backend)?;
    let backend = connect(&config, &args.backend)?;
    let store = SessionStore::new(&config.session.state_file);
    let session = session_context(&config, None)?.with_user(store.load()?);

    let question = match (&args.question, args.suggested) {
        (Some(question), _) => question.clone(),
        // clap keeps `choice` within 1..=3.
        (None, Some(choice)) => SUGGESTED_QUESTIONS[usize::from(choice) - 1].to_string(),
        (None, None) => {
            println!("Suggested questions (use --suggested N):");
            for (index, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
                println!("  {}. {}", index + 1, question);
            }
            return Ok(());
        }
    };

    let mut conversation = Conversation::new(args.job_id);
    match conversation
        .ask(backend.as_ref(), &question, session.user_id())
        .await?
    {
        Some(answer) => {
            println!("{}", answer.career_title);
            println!("{}", answer.response);
        }
        None => println!("Ask a question about this career."),
    }
    Ok(())
}

pub(crate) async fn run_profile(args: ProfileArgs) -> Result<(), AppError> {
    let config = command_config(&args.backend)?;
    let store = SessionStore::new(&config.session.state_file);

    if args.forget {
        store.clear()?;
        println!("Forgot the stored profile.");
        return Ok(());
    }

    let Some(user_id) = store.load()? else {
        println!("No profile yet. Run `signup` to create one.");
        return Ok(());
    };

    let backend = connect(&config, &args.backend)?;
    let profile = backend.get_profile(&user_id).await?;
    println!("Hi, {}! ({})", profile.name, profile.id);
    println!("Status: {}", profile.status);
    println!("Field of study: {}", profile.field_of_study);
    println!("Interests: {}", profile.interests);
    println!("Goal: {}", profile.goal);
    Ok(())
}

pub(crate) fn run_languages(args: LanguageArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli()?;
    let session = session_context(&config, args.language.as_deref())?;

    for language in Language::ordered() {
        let marker = if language == session.preferences.language {
            "*"
        } else {
            " "
        };
        let view = language.view();
        println!("{marker} {} {} ({})", view.code, view.name, view.region);
    }
    Ok(())
}

/// Prints where the wizard hands control next.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, destination: Destination) {
        match destination {
            Destination::Home => println!("Welcome aboard! Continue at {}", destination.path()),
            Destination::Landing => println!("Signup cancelled. Back to {}", destination.path()),
        }
    }
}

fn parse_option<T>(
    input: &str,
    from_choice: fn(usize) -> Option<T>,
    from_label: fn(&str) -> Option<T>,
) -> Option<T> {
    match input.trim().parse::<usize>() {
        Ok(choice) => from_choice(choice),
        Err(_) => from_label(input),
    }
}

fn print_options(labels: impl Iterator<Item = (&'static str, bool)>) {
    for (index, (label, selected)) in labels.enumerate() {
        let marker = if selected { "x" } else { " " };
        println!("  [{marker}] {}. {}", index + 1, label);
    }
}

async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>, AppError> {
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

pub(crate) async fn run_signup(args: SignupArgs) -> Result<(), AppError> {
    let config = command_config(&args.backend)?;
    let backend = connect(&config, &args.backend)?;
    let store = SessionStore::new(&config.session.state_file);
    let session = session_context(&config, args.language.as_deref())?;
    let mut flow = SignupFlow::new(backend, ConsoleNavigator, session);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Welcome to Career Nirvana. Type `back` to go to the previous step.");
    loop {
        let wizard = flow.wizard();
        let step = wizard.step();
        println!();
        println!("Step {}/5: {}", step.number(), step.prompt());
        match step {
            WizardStep::Name => {}
            WizardStep::Status => print_options(
                Status::ordered()
                    .iter()
                    .map(|option| (option.label(), wizard.fields().status == Some(*option))),
            ),
            WizardStep::FieldOfStudy => print_options(FieldOfStudy::ordered().iter().map(
                |option| (option.label(), wizard.fields().field_of_study == Some(*option)),
            )),
            WizardStep::Interests => {
                print_options(Interest::ordered().iter().map(|option| {
                    (option.label(), wizard.fields().interests.contains(option))
                }));
                println!("  Enter a number to toggle it, or an empty line to continue.");
            }
            WizardStep::Goal => print_options(
                Goal::ordered()
                    .iter()
                    .map(|option| (option.label(), wizard.fields().goal == Some(*option))),
            ),
        }

        let Some(input) = next_line(&mut lines).await? else {
            println!("Signup abandoned.");
            return Ok(());
        };

        if input.eq_ignore_ascii_case("back") {
            if flow.retreat() == Retreat::Exit {
                return Ok(());
            }
            continue;
        }

        let wizard = flow.wizard_mut();
        match step {
            WizardStep::Name => wizard.set_name(input),
            WizardStep::Status => match parse_option(&input, Status::from_choice, Status::from_label) {
                Some(status) => wizard.select_status(status),
                None => println!("Pick one of the listed options."),
            },
            WizardStep::FieldOfStudy => {
                match parse_option(&input, FieldOfStudy::from_choice, FieldOfStudy::from_label) {
                    Some(field) => wizard.select_field_of_study(field),
                    None => println!("Pick one of the listed options."),
                }
            }
            WizardStep::Interests if !input.is_empty() => {
                match parse_option(&input, Interest::from_choice, Interest::from_label) {
                    Some(interest) => {
                        wizard.toggle_interest(interest)?;
                    }
                    None => println!("Pick one of the listed options."),
                }
                continue;
            }
            WizardStep::Interests => {}
            WizardStep::Goal => {
                if let Some(goal) = parse_option(&input, Goal::from_choice, Goal::from_label) {
                    wizard.select_goal(goal);
                }
            }
        }

        if step != WizardStep::Goal {
            if let Err(err) = flow.wizard_mut().advance() {
                println!("{err}");
            }
            continue;
        }

        if !flow.wizard().can_submit() {
            println!("Pick one of the listed options.");
            continue;
        }

        println!("Completing signup...");
        match flow.submit().await? {
            SubmissionOutcome::Created(user) => {
                store.save(&user.id)?;
                println!("Hi, {}! Your profile id is {}.", user.name, user.id);
                return Ok(());
            }
            SubmissionOutcome::Failed { message } => {
                println!("{message}");
                println!("Press enter to try again, or type `back` to change your answers.");
            }
        }
    }
}
