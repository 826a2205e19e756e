use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use support_chat::app::{App, ChatStatus, GatewayConnector, Page};
use support_chat::config::Config;
use support_chat::content;
use support_chat::gateway::ModelGateway;
use support_chat::gemini::GeminiClient;
use support_chat::i18n::LanguageRegistry;
use support_chat::orchestrator::{ChatMessage, OrchestratorConfig, Sender, TurnOutcome};
use support_chat::preferences::{PreferenceStore, Theme};
use support_chat::voice::ToggleOutcome;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they do not interleave with the transcript on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("support_chat=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting support chat v{}", content::APP_VERSION);

    let config = Config::from_env()?;

    let connector: GatewayConnector = {
        let config = config.clone();
        Box::new(move || {
            let client = GeminiClient::from_config(&config)?;
            Ok(Arc::new(client) as Arc<dyn ModelGateway>)
        })
    };
    let orchestrator_config = OrchestratorConfig {
        translation_temperature: config.translation_temperature,
        ..Default::default()
    };

    // Terminals have no speech recognizer
    let mut app = App::new(
        PreferenceStore::new(config.preferences_file.clone()),
        connector,
        orchestrator_config,
        false,
    );

    let mut shown = HashSet::new();
    render_page(&app, &mut shown).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Navigate(page) => {
                app.navigate(page).await;
                render_page(&app, &mut shown).await;
            }
            Command::Login { username, password } => {
                match app.login(username, password).await {
                    Ok(_) => render_page(&app, &mut shown).await,
                    Err(e) => println!("{}", e),
                }
            }
            Command::Logout => {
                app.logout().await;
                shown.clear();
                println!("Logged out.");
                render_page(&app, &mut shown).await;
            }
            Command::Language(None) => print_languages(&app),
            Command::Language(Some(code)) => match app.change_language(code).await {
                Ok(language) => {
                    println!("Language set to {}.", language);
                    render_new_messages(&app, &mut shown).await;
                }
                Err(e) => println!("{}", e),
            },
            Command::Theme => {
                let theme = app.toggle_theme();
                println!("Theme set to {}.", theme_label(theme));
            }
            Command::Retry => {
                app.retry_initialization().await;
                render_page(&app, &mut shown).await;
            }
            Command::Suggest(None) => print_suggestions(),
            Command::Suggest(Some(arg)) => {
                let Some(index) = suggestion_index(arg) else {
                    println!(
                        "Pick a suggestion between 1 and {}.",
                        content::SUGGESTED_PROMPTS.len()
                    );
                    continue;
                };
                if !require_chat(&app) {
                    continue;
                }
                let outcome = app.send_suggested(index).await;
                report_outcome(&app, outcome, &mut shown).await;
            }
            Command::Mic => match app.toggle_voice() {
                ToggleOutcome::Unsupported => {
                    println!("{}", app.voice().error().unwrap_or_default())
                }
                ToggleOutcome::Started => println!("Listening..."),
                ToggleOutcome::Stopped => println!("Stopped listening."),
            },
            Command::Stats => match app.orchestrator() {
                Some(orchestrator) => {
                    let report = orchestrator.translation_metrics();
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                None => println!("No chat session yet."),
            },
            Command::Unknown(command) => {
                println!("Unknown command {}. Type /help for a list.", command)
            }
            Command::Say(text) => {
                if !require_chat(&app) {
                    continue;
                }
                app.set_input(text).await;
                let outcome = app.send_input().await;
                report_outcome(&app, outcome, &mut shown).await;
            }
        }
    }

    info!("Goodbye");
    Ok(())
}

// ==================== Commands ====================

enum Command<'a> {
    Navigate(Page),
    Login { username: &'a str, password: &'a str },
    Logout,
    Language(Option<&'a str>),
    Theme,
    Retry,
    Suggest(Option<&'a str>),
    Mic,
    Stats,
    Help,
    Quit,
    Say(&'a str),
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        if !line.starts_with('/') {
            return Command::Say(line);
        }

        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        match name {
            "/home" => Command::Navigate(Page::Home),
            "/chat" => Command::Navigate(Page::Chat),
            "/settings" => Command::Navigate(Page::Settings),
            "/login" => match (words.next(), words.next()) {
                (Some(username), Some(password)) => Command::Login { username, password },
                (Some(username), None) => Command::Login {
                    username,
                    password: "",
                },
                _ => Command::Navigate(Page::Login),
            },
            "/logout" => Command::Logout,
            "/lang" => Command::Language(words.next()),
            "/theme" => Command::Theme,
            "/retry" => Command::Retry,
            "/suggest" => Command::Suggest(words.next()),
            "/mic" => Command::Mic,
            "/stats" => Command::Stats,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other),
        }
    }
}

/// Zero-based prompt index for a 1-based `/suggest` argument.
fn suggestion_index(arg: &str) -> Option<usize> {
    match arg.parse::<usize>() {
        Ok(n) if (1..=content::SUGGESTED_PROMPTS.len()).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn require_chat(app: &App) -> bool {
    if app.page() != Page::Chat {
        println!("Open the chat with /chat first.");
        return false;
    }
    true
}

// ==================== Rendering ====================

async fn render_page(app: &App, shown: &mut HashSet<Uuid>) {
    println!();
    match app.page() {
        Page::Home => {
            println!("== {} ==", content::COMPANY_NAME);
            println!("{}", content::COMPANY_INFO.description);
            match app.current_user() {
                Some(user) => println!("Welcome back, {}. Type /chat to talk to us.", user),
                None => println!("Type /login <username> <password> to start a demo session."),
            }
            println!("Type /help for all commands.");
        }
        Page::Login => {
            println!("== Login ==");
            println!("Use /login <username> <password>. Any values work in this demo.");
        }
        Page::Settings => render_settings(app),
        Page::Chat => render_chat(app, shown).await,
    }
}

fn render_settings(app: &App) {
    println!("== Settings ==");
    println!("Version: {}", content::APP_VERSION);
    println!("Theme: {}", theme_label(app.theme()));
    println!("Language: {}", app.language());
    println!();
    println!("About\n  {}", content::ABOUT);
    println!("How to use");
    for (i, step) in content::HOW_TO_USE.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("Key features");
    for feature in content::KEY_FEATURES {
        println!("  - {}", feature);
    }
    println!("Data privacy\n  {}", content::DATA_PRIVACY);
    println!(
        "Contact\n  {}\n  {}",
        content::COMPANY_INFO.email,
        content::COMPANY_INFO.website
    );
}

async fn render_chat(app: &App, shown: &mut HashSet<Uuid>) {
    println!("== {} ({}) ==", content::CHATBOT_NAME, app.language());
    match app.chat_status().await {
        ChatStatus::LoginRequired => println!("Please log in first."),
        ChatStatus::ConfigurationError(message) => {
            println!("{}", message);
            println!("Fix the configuration, then type /retry.");
        }
        ChatStatus::Initializing => println!("Connecting..."),
        ChatStatus::InitializationFailed(message) => {
            println!("{}", message);
            println!("Type /retry to try again.");
        }
        ChatStatus::Ready => {
            shown.clear();
            render_new_messages(app, shown).await;
            let fresh = match app.orchestrator() {
                Some(orchestrator) => orchestrator.transcript().await.len() <= 1,
                None => false,
            };
            if fresh {
                print_suggestions();
            }
        }
    }
}

async fn render_new_messages(app: &App, shown: &mut HashSet<Uuid>) {
    let Some(orchestrator) = app.orchestrator() else {
        return;
    };
    for message in orchestrator.transcript().await {
        if shown.insert(message.id) {
            print_message(&message);
        }
    }
}

fn print_message(message: &ChatMessage) {
    let speaker = match message.sender {
        Sender::User => "You",
        Sender::Bot => content::CHATBOT_NAME,
    };
    println!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M"),
        speaker,
        message.text
    );
}

async fn report_outcome(app: &App, outcome: TurnOutcome, shown: &mut HashSet<Uuid>) {
    match outcome {
        TurnOutcome::Answered(_) => render_new_messages(app, shown).await,
        TurnOutcome::Failed { .. } => {
            render_new_messages(app, shown).await;
            if let Some(banner) = match app.orchestrator() {
                Some(orchestrator) => orchestrator.error().await,
                None => None,
            } {
                println!("! {}", banner);
            }
        }
        TurnOutcome::Ignored => println!("(Not sent: the chat is not ready.)"),
        TurnOutcome::Abandoned => {}
    }
}

fn print_suggestions() {
    println!("Suggestions (send with /suggest <n>):");
    for (i, prompt) in content::SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  {}. {}", i + 1, prompt);
    }
}

fn print_languages(app: &App) {
    let current = app.language();
    for language in LanguageRegistry::get().list_enabled() {
        let marker = if language.code == current.code() { "*" } else { " " };
        println!(" {} {:<6} {}", marker, language.code, language.display_name);
    }
    println!("Change with /lang <code>.");
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /home, /chat, /settings   switch page");
    println!("  /login <user> <password>  start a demo session");
    println!("  /logout                   end the session");
    println!("  /lang [code]              list or change the language");
    println!("  /theme                    toggle light/dark");
    println!("  /retry                    retry a failed chat start");
    println!("  /suggest [n]              list or send a suggested prompt");
    println!("  /mic                      toggle voice input");
    println!("  /stats                    translation statistics");
    println!("  /quit                     exit");
    println!("Anything else is sent as a chat message.");
}
