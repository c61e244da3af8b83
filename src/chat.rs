use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::agent::{Agent, AnalysisRequest, DispatchOutcome, ImageInput, Persona};
use crate::report;
use crate::session::Session;
use crate::skin::SkinType;

const HELP: &str = "\
Type a question to analyze it with the current persona.
  :persona <name>   switch persona (vision, herbal, home, exercise, dermatologist, research)
  :skin <type>      set skin type (oily, combination, normal, dry, sensitive)
  :image <path>     attach a PNG/JPEG photo to the next questions
  :clear-image      detach the photo
  :report [path]    save the last analysis as PDF
  :help             show this help
  :quit             leave
An empty line sends the attached photo on its own.";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Ask(String),
    Persona(Persona),
    Skin(SkinType),
    Image(PathBuf),
    ClearImage,
    Report(Option<PathBuf>),
    Help,
    Quit,
}

pub fn parse(line: &str) -> std::result::Result<ChatCommand, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ChatCommand::Ask(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "persona" => Persona::from_str(arg, true)
            .map(ChatCommand::Persona)
            .map_err(|_| format!("Unknown persona '{}'", arg)),
        "skin" => SkinType::from_str(arg, true)
            .map(ChatCommand::Skin)
            .map_err(|_| format!("Unknown skin type '{}'", arg)),
        "image" if !arg.is_empty() => Ok(ChatCommand::Image(PathBuf::from(arg))),
        "image" => Err(":image needs a path".to_string()),
        "clear-image" => Ok(ChatCommand::ClearImage),
        "report" if arg.is_empty() => Ok(ChatCommand::Report(None)),
        "report" => Ok(ChatCommand::Report(Some(PathBuf::from(arg)))),
        "help" => Ok(ChatCommand::Help),
        "quit" | "exit" => Ok(ChatCommand::Quit),
        other => Err(format!("Unknown command ':{}' (try :help)", other)),
    }
}

struct ChatState {
    persona: Persona,
    skin_type: SkinType,
    image: Option<ImageInput>,
    session: Session,
}

pub async fn run(
    agent: &Agent,
    persona: Persona,
    skin_type: SkinType,
    verbose: bool,
) -> Result<()> {
    let mut state = ChatState {
        persona,
        skin_type,
        image: None,
        session: Session::new(),
    };

    println!("{}\n", HELP);
    print_prompt(&state)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        match parse(&line) {
            Ok(ChatCommand::Quit) => break,
            Ok(command) => handle(agent, &mut state, command, verbose).await?,
            Err(message) => eprintln!("{}", message),
        }
        print_prompt(&state)?;
    }

    Ok(())
}

async fn handle(
    agent: &Agent,
    state: &mut ChatState,
    command: ChatCommand,
    verbose: bool,
) -> Result<()> {
    match command {
        ChatCommand::Ask(question) => {
            let request = AnalysisRequest {
                persona: state.persona,
                skin_type: state.skin_type,
                question,
                image: state.image.clone(),
            };
            eprintln!("{} is analyzing...", state.persona);
            match agent.dispatch(&request).await {
                DispatchOutcome::Completed { result, log } => {
                    println!("\n{}\n", result.merged_response);
                    if verbose {
                        eprintln!("{}", log.summary());
                    }
                    state.session.store(result);
                }
                DispatchOutcome::Rejected { warning } => eprintln!("Warning: {}", warning),
                DispatchOutcome::Failed { failure, message } => {
                    println!("\n{}\n", message);
                    if verbose {
                        eprintln!("Failure: {}", failure.kind());
                    }
                }
            }
        }
        ChatCommand::Persona(persona) => {
            state.persona = persona;
            println!("Now talking to {}.", persona.display_name());
        }
        ChatCommand::Skin(skin_type) => {
            state.skin_type = skin_type;
            println!("Skin type set to {}.", skin_type);
        }
        ChatCommand::Image(path) => match ImageInput::load(&path) {
            Ok(image) => {
                println!("Attached {} ({}).", path.display(), image.mime_type());
                state.image = Some(image);
            }
            Err(e) => eprintln!("{:#}", e),
        },
        ChatCommand::ClearImage => {
            state.image = None;
            println!("Photo detached.");
        }
        ChatCommand::Report(target) => match state.session.current() {
            Some(result) => {
                let target = target.unwrap_or_else(|| PathBuf::from("."));
                match report::save(result, &target) {
                    Ok(path) => println!("Report saved to {}", path.display()),
                    Err(e) => eprintln!("{:#}", e),
                }
            }
            None => eprintln!("No analysis to report yet."),
        },
        ChatCommand::Help => println!("{}", HELP),
        ChatCommand::Quit => {}
    }
    Ok(())
}

fn print_prompt(state: &ChatState) -> Result<()> {
    let photo = if state.image.is_some() { " +photo" } else { "" };
    print!("[{} | {}{}] > ", state.persona.label(), state.skin_type, photo);
    std::io::stdout().flush().context("Failed to flush stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::merger::Merger;
    use crate::llm::invoker::tests::StubGateway;
    use crate::llm::ModelInvoker;
    use crate::tools::{ResearchClient, Toolbox};
    use std::sync::Arc;

    fn agent(gateway: StubGateway) -> Agent {
        let invoker = ModelInvoker::new(
            Arc::new(gateway),
            "vision-model".into(),
            "text-model".into(),
        );
        let merger = Merger::new(Toolbox::new(ResearchClient::new("http://127.0.0.1:9")));
        Agent::with_parts(invoker, merger, None)
    }

    fn state() -> ChatState {
        ChatState {
            persona: Persona::VisionExpert,
            skin_type: SkinType::Dry,
            image: None,
            session: Session::new(),
        }
    }

    #[tokio::test]
    async fn test_session_keeps_last_completed_analysis() {
        let replying = agent(StubGateway::replying("Looks like mild dryness."));
        let failing = agent(StubGateway::failing("socket timeout"));
        let mut state = state();

        let ask = ChatCommand::Ask("flaky cheeks".to_string());
        handle(&failing, &mut state, ask.clone(), false).await.unwrap();
        assert!(state.session.current().is_none());

        handle(&replying, &mut state, ask.clone(), false).await.unwrap();
        let stored = state.session.current().unwrap().clone();
        assert_eq!(stored.question, "flaky cheeks");
        assert_eq!(stored.merged_response, "Looks like mild dryness.");
        assert_eq!(stored.model, "text-model");

        handle(&failing, &mut state, ChatCommand::Ask("again".to_string()), false)
            .await
            .unwrap();
        assert_eq!(state.session.current(), Some(&stored));

        handle(&replying, &mut state, ChatCommand::Ask(String::new()), false)
            .await
            .unwrap();
        assert_eq!(state.session.current(), Some(&stored));
    }

    #[test]
    fn test_plain_lines_are_questions() {
        assert_eq!(
            parse("  I have acne  "),
            Ok(ChatCommand::Ask("I have acne".to_string()))
        );
        assert_eq!(parse(""), Ok(ChatCommand::Ask(String::new())));
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            parse(":persona research"),
            Ok(ChatCommand::Persona(Persona::ResearchAssistant))
        );
        assert_eq!(parse(":skin DRY"), Ok(ChatCommand::Skin(SkinType::Dry)));
        assert_eq!(
            parse(":image ./face photo.jpg"),
            Ok(ChatCommand::Image(PathBuf::from("./face photo.jpg")))
        );
        assert_eq!(parse(":report"), Ok(ChatCommand::Report(None)));
        assert_eq!(
            parse(":report out.pdf"),
            Ok(ChatCommand::Report(Some(PathBuf::from("out.pdf"))))
        );
        assert_eq!(parse(":quit"), Ok(ChatCommand::Quit));
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse(":persona astrologer").is_err());
        assert!(parse(":skin scaly").is_err());
        assert!(parse(":image").is_err());
        assert!(parse(":dance").is_err());
    }
}
