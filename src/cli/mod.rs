use crate::{
    AssistantConfig, ChatSession, FallbackMessage, Language, RetryPolicy, TravelAssistant,
};
use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

/// CLI entry point for the safar tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let assistant = TravelAssistant::new(build_config(&matches)?);

    match matches.subcommand() {
        Some(("chat", sub)) => chat(&assistant, language_arg(sub)?).await,
        Some(("itinerary", sub)) => itinerary(&assistant, sub).await,
        Some(("search", sub)) => search(&assistant, sub).await,
        _ => Err(anyhow!("a subcommand is required; see --help")),
    }
}

fn command() -> Command {
    let lang = Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .help("Response language (en or ar)")
        .default_value("en");

    Command::new("safar")
        .version("0.1.0")
        .about("AI travel assistant: chat, itineraries and grounded search")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .global(true)
                .value_name("MODEL")
                .help("Model name (or set SAFAR_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .global(true)
                .value_name("KEY")
                .help("API key (or set API_KEY / GEMINI_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help("Endpoint base URL (or set SAFAR_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .global(true)
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds; none by default"),
        )
        .arg(
            Arg::new("max-retries")
                .short('r')
                .long("max-retries")
                .global(true)
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("Retries for transient network failures; 0 by default"),
        )
        .subcommand(
            Command::new("chat")
                .about("Interactive chat with the assistant")
                .arg(lang.clone()),
        )
        .subcommand(
            Command::new("itinerary")
                .about("Generate a day-by-day itinerary")
                .arg(
                    Arg::new("destination")
                        .help("Where to go")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("DAYS")
                        .value_parser(value_parser!(u32).range(1..))
                        .default_value("3"),
                )
                .arg(lang),
        )
        .subcommand(
            Command::new("search")
                .about("Web-grounded question with sources")
                .arg(
                    Arg::new("query")
                        .help("What to ask")
                        .required(true)
                        .index(1),
                ),
        )
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<AssistantConfig> {
    let mut config = AssistantConfig::from_env();

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(key.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*secs));
    }
    if let Some(retries) = matches.get_one::<usize>("max-retries") {
        config = config.with_retry(RetryPolicy::default().with_max_retries(*retries));
    }

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    Ok(config)
}

fn language_arg(matches: &ArgMatches) -> anyhow::Result<Language> {
    let raw = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .unwrap_or("en");
    raw.parse::<Language>()
        .with_context(|| format!("invalid --lang value `{raw}`"))
}

async fn chat(assistant: &TravelAssistant, language: Language) -> anyhow::Result<()> {
    let mut session = ChatSession::new(language);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(welcome) = session.last_turn() {
        stdout
            .write_all(format!("safar> {}\n", welcome.text).as_bytes())
            .await?;
    }

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "/quit" | "/exit" => break,
            _ if line.starts_with("/lang ") => {
                match line["/lang ".len()..].parse::<Language>() {
                    Ok(language) => session.set_language(language),
                    Err(err) => stdout.write_all(format!("{err}\n").as_bytes()).await?,
                }
                continue;
            }
            _ => {}
        }

        if let Some(reply) = session.send(assistant, line).await {
            let marker = if reply.is_error { "safar (error)>" } else { "safar>" };
            stdout
                .write_all(format!("{marker} {}\n", reply.text).as_bytes())
                .await?;
        }
    }

    Ok(())
}

async fn itinerary(assistant: &TravelAssistant, matches: &ArgMatches) -> anyhow::Result<()> {
    let language = language_arg(matches)?;
    let destination = matches
        .get_one::<String>("destination")
        .ok_or_else(|| anyhow!("destination is required"))?;
    let days = matches.get_one::<u32>("days").copied().unwrap_or(3);

    info!("Planning {} days in {}", days, destination);

    match assistant
        .generate_itinerary(destination, days, language)
        .await
    {
        Ok(plan) => {
            println!("{plan}");
            Ok(())
        }
        Err(err) => {
            if err.is_generation_failure() {
                error!("Model reply rejected: {}", err);
            } else {
                error!("Itinerary generation failed: {}", err);
            }
            eprintln!("{}", language.fallback(FallbackMessage::ItineraryFailed));
            Err(err.into())
        }
    }
}

async fn search(assistant: &TravelAssistant, matches: &ArgMatches) -> anyhow::Result<()> {
    let query = matches
        .get_one::<String>("query")
        .ok_or_else(|| anyhow!("query is required"))?;

    let answer = assistant.search_grounded(query).await?;
    println!("{}", answer.text.as_deref().unwrap_or(""));

    if answer.has_citations() {
        println!("\nSources:");
        for (idx, citation) in answer.citations.iter().enumerate() {
            match &citation.uri {
                Some(uri) => println!("  [{}] {} <{}>", idx + 1, citation.label(), uri),
                None => println!("  [{}] {}", idx + 1, citation.label()),
            }
        }
    }

    Ok(())
}
