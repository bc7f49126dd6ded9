use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use uuid::Uuid;

mod assistant;
mod classify;
mod config;
mod generator;
mod llm;
mod models;
mod prompts;
mod repl;
mod report;
mod session;

use crate::assistant::Assistant;
use crate::config::Config;
use crate::generator::{GenerationParams, ResponseGenerator};
use crate::llm::AnthropicClient;

#[derive(Parser)]
#[command(name = "iep-assistant")]
#[command(about = "IEP planning and mechatronics education assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Chat,
    /// Answer a single question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Print the topic category a query routes to
    Classify {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Print the canned answer used when the model is unreachable
    Offline {
        #[arg(required = true)]
        query: Vec<String>,
    },
}

fn init_tracing(config: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match config.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: IEP_ASSISTANT_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    config.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn build_assistant(config: &Config) -> anyhow::Result<Assistant<AnthropicClient>> {
    if config.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; answers will come from the offline responder");
    }
    let client = AnthropicClient::new(config).context("failed to build API client")?;
    let generator = ResponseGenerator::new(client, GenerationParams::from(config));
    Ok(Assistant::new(generator))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let assistant = build_assistant(&config)?;
            let session_id = Uuid::new_v4();
            info!(session = %session_id, model = %config.model, "session started");

            let repl = repl::Repl {
                assistant: &assistant,
                model: config.model.clone(),
                online: config.api_key.is_some(),
            };
            let mut session = session::Session::new();
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            repl.run(&mut session, &mut stdin.lock(), &mut stdout.lock())
                .await?;

            let stats = session.stats();
            info!(
                session = %session_id,
                messages = stats.messages,
                students = stats.students,
                presentations = stats.presentations,
                "session ended"
            );
        }
        Commands::Ask { question } => {
            let assistant = build_assistant(&config)?;
            println!("{}", assistant.ask(&question.join(" ")).await);
        }
        Commands::Classify { query } => {
            println!("{}", classify::classify(&query.join(" ")));
        }
        Commands::Offline { query } => {
            println!("{}", generator::offline_answer(&query.join(" ")));
        }
    }

    Ok(())
}
