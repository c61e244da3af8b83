mod agent;
mod chat;
mod config;
mod instrumentation;
mod llm;
mod report;
mod session;
mod skin;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use agent::{Agent, AnalysisRequest, DispatchOutcome, ImageInput, Persona};
use config::{Config, LogFormat};
use skin::SkinType;

#[derive(Parser)]
#[command(
    name = "skincare-agents",
    about = "Skincare advice from specialist AI personas, with optional photo analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print model and tool details after each analysis
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one question and/or photo
    Ask {
        #[arg(short, long, value_enum, default_value = "vision")]
        persona: Persona,
        #[arg(short, long, value_enum, default_value = "normal")]
        skin_type: SkinType,
        /// Your skin question or concern
        #[arg(short, long)]
        question: Option<String>,
        /// PNG or JPEG photo of the affected skin
        #[arg(short, long)]
        image: Option<PathBuf>,
        /// Save a PDF report to this file or directory
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// Interactive session that keeps the last analysis for reporting
    Chat {
        #[arg(short, long, value_enum, default_value = "vision")]
        persona: Persona,
        #[arg(short, long, value_enum, default_value = "normal")]
        skin_type: SkinType,
    },
    /// List the available personas
    Personas,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    match cli.command {
        Commands::Ask {
            persona,
            skin_type,
            question,
            image,
            report: report_target,
        } => {
            let agent = Agent::new(&config)?;
            let image = image.as_deref().map(ImageInput::load).transpose()?;
            let request = AnalysisRequest {
                persona,
                skin_type,
                question: question.unwrap_or_default(),
                image,
            };

            match agent.dispatch(&request).await {
                DispatchOutcome::Completed { result, log } => {
                    println!("\n{}\n", result.merged_response);
                    if cli.verbose {
                        eprintln!("{}", log.summary());
                    }
                    if let Some(target) = report_target {
                        let path = report::save(&result, &target)?;
                        println!("Report saved to {}", path.display());
                    }
                }
                DispatchOutcome::Rejected { warning } => eprintln!("Warning: {}", warning),
                DispatchOutcome::Failed { failure, message } => {
                    println!("\n{}\n", message);
                    if cli.verbose {
                        eprintln!("Failure: {}", failure.kind());
                    }
                }
            }
        }
        Commands::Chat { persona, skin_type } => {
            let agent = Agent::new(&config)?;
            chat::run(&agent, persona, skin_type, cli.verbose).await?;
        }
        Commands::Personas => {
            for persona in Persona::ALL {
                let name = persona
                    .to_possible_value()
                    .map(|v| v.get_name().to_string())
                    .unwrap_or_default();
                let tools = persona
                    .tools()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:<14} {:<28} tools: {}",
                    name,
                    persona.display_name(),
                    if tools.is_empty() { "none" } else { tools.as_str() }
                );
            }
        }
    }

    Ok(())
}
