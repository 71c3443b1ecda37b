//! Binary entrypoint for the questline CLI.
//!
//! Commands:
//! - `run` - interactive menu loop for managing users and quests
//! - `init` - create a starter `config.toml`
//! - `generate --goal <text> [-n <count>] [--mode <mock|sim>]` - one-shot generation to stdout
//! - `status` - print a summary of the quest store
//!
//! All terminal formatting lives here; the library crate only exchanges plain
//! data. See the library crate docs for module-level details: `questline::`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};

use questline::config::Config;
use questline::engine::{GeneratedQuest, Mode, QuestEngine};
use questline::logutil::escape_log;
use questline::tracker::{CompletionOutcome, Quest, QuestTracker};

#[derive(Parser)]
#[command(name = "questline")]
#[command(about = "A personal quest tracker with a deterministic quest generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive quest tracker menu
    Run,
    /// Initialize a new questline configuration
    Init,
    /// Generate quest suggestions for a goal and print them as JSON
    Generate {
        /// The goal to generate quests for
        #[arg(short, long)]
        goal: String,
        /// Number of quests to generate
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Generation mode: "mock" or "sim"
        #[arg(short, long, default_value = "sim")]
        mode: String,
    },
    /// Show quest store status and statistics
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Run => {
            let config = pre_config.unwrap_or_else(|| {
                warn!("No config at {}; using built-in defaults", cli.config);
                Config::default()
            });
            run_menu(config)
        }
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Wrote default configuration to {}", cli.config);
            Ok(())
        }
        Commands::Generate { goal, count, mode } => {
            let config = pre_config.unwrap_or_default();
            let mode: Mode = mode.parse()?;
            let engine = QuestEngine::new(config.engine);
            let quests = engine.generate(&goal, count, mode);
            println!("{}", serde_json::to_string_pretty(&quests)?);
            Ok(())
        }
        Commands::Status => {
            let config = pre_config.unwrap_or_default();
            let tracker = QuestTracker::open(&config.tracker.data_file);
            println!("Quest store: {}", tracker.data_file().display());
            println!("Users: {}", tracker.user_count());
            for user in tracker.users() {
                let done = user.quests.iter().filter(|q| q.completed).count();
                println!(
                    "  {} - {} pts, {}/{} quests complete",
                    user.username,
                    user.points,
                    done,
                    user.quests.len()
                );
            }
            Ok(())
        }
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(file) = config.as_ref().and_then(|c| c.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let mutex = std::sync::Mutex::new(f);
            // If stdout is not a terminal, skip the console copy
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
    }
    let _ = builder.try_init();
}

fn print_menu() {
    println!("\n=== Questline ===");
    println!("1) Create or switch user");
    println!("2) Add a quest manually");
    println!("3) Generate quests");
    println!("4) List quests");
    println!("5) Complete a quest");
    println!("6) Reset completed quests");
    println!("7) Save & exit");
    println!("0) Exit without saving");
}

/// Prompt and read one trimmed line; EOF behaves like choosing exit.
fn input_choice(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => "0".to_string(),
        Ok(_) => line.trim().to_string(),
    }
}

fn run_menu(config: Config) -> Result<()> {
    let engine = QuestEngine::new(config.engine);
    let mut tracker = QuestTracker::open(&config.tracker.data_file);
    let mut current_user: Option<String> = None;

    println!("Welcome - start by creating or switching to a user.");
    loop {
        if let Some(user) = current_user.as_deref().and_then(|u| tracker.user(u)) {
            println!("\nCurrent user: {}  |  Points: {}", user.username, user.points);
        }
        print_menu();
        match input_choice("> ").as_str() {
            "1" => {
                let username = input_choice("Enter username: ");
                match tracker.add_user(&username) {
                    Ok(true) => {
                        info!("created user '{}'", escape_log(&username));
                        println!("Created user '{}'.", username);
                        current_user = Some(username);
                    }
                    Ok(false) => {
                        println!("Switched to existing user '{}'.", username);
                        current_user = Some(username);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "2" => {
                let Some(username) = current_user.clone() else {
                    println!("Create or switch to a user first (option 1).");
                    continue;
                };
                let name = input_choice("Quest name: ");
                let description = input_choice("Short description: ");
                let points = input_choice("Points (default 10): ")
                    .parse::<u32>()
                    .unwrap_or(10);
                match tracker.add_quest(&username, Quest::new(name.clone(), description, points)) {
                    Ok(()) => println!("Added quest '{}'.", name),
                    Err(e) => println!("{}", e),
                }
            }
            "3" => {
                let Some(username) = current_user.clone() else {
                    println!("Create or switch to a user first (option 1).");
                    continue;
                };
                generate_interactive(&engine, &mut tracker, &username);
            }
            "4" => {
                let Some(username) = current_user.as_deref() else {
                    println!("Create or switch to a user first (option 1).");
                    continue;
                };
                match tracker.quests(username) {
                    Some(quests) if !quests.is_empty() => {
                        println!("\nYour quests:");
                        for (i, q) in quests.iter().enumerate() {
                            let status = if q.completed { "x" } else { " " };
                            println!(
                                "[{}] ({}) {} - {} pts\n    {}",
                                i + 1,
                                status,
                                q.name,
                                q.points,
                                q.description
                            );
                        }
                    }
                    _ => println!("No quests found."),
                }
            }
            "5" => {
                let Some(username) = current_user.clone() else {
                    println!("Create or switch to a user first (option 1).");
                    continue;
                };
                let quest_name = match input_choice("Enter quest number to mark complete: ")
                    .parse::<usize>()
                {
                    Ok(idx) if idx >= 1 => match tracker.quests(&username) {
                        Some(quests) if idx <= quests.len() => quests[idx - 1].name.clone(),
                        _ => {
                            println!("Number out of range.");
                            continue;
                        }
                    },
                    _ => {
                        println!("Invalid input.");
                        continue;
                    }
                };
                match tracker.complete_quest(&username, &quest_name) {
                    CompletionOutcome::Completed { points } => {
                        println!("Marked '{}' complete. +{} pts", quest_name, points)
                    }
                    CompletionOutcome::AlreadyCompleted => {
                        println!("That quest is already completed.")
                    }
                    CompletionOutcome::NotFound => println!("Quest not found."),
                }
            }
            "6" => {
                let Some(username) = current_user.clone() else {
                    println!("Create or switch to a user first (option 1).");
                    continue;
                };
                if tracker.reset_quests(&username) {
                    println!("Cleared completion flags and points for '{}'.", username);
                }
            }
            "7" => {
                tracker.save()?;
                println!("Saved. Goodbye!");
                return Ok(());
            }
            "0" => {
                println!("Exiting without saving.");
                return Ok(());
            }
            _ => println!("Unknown choice - try again."),
        }
    }
}

fn generate_interactive(engine: &QuestEngine, tracker: &mut QuestTracker, username: &str) {
    let goal = input_choice("Enter a short goal (e.g., 'improve morning routine'): ");
    if goal.is_empty() {
        println!("Goal cannot be empty.");
        return;
    }
    let count = input_choice("How many quests to generate? (default 5): ")
        .parse::<usize>()
        .unwrap_or(5);
    let mode_input = input_choice("Choose generation mode - 'mock' or 'sim' (default sim): ");
    let mode = if mode_input.is_empty() {
        Mode::Simulated
    } else {
        match mode_input.parse::<Mode>() {
            Ok(mode) => mode,
            Err(e) => {
                println!("{}", e);
                return;
            }
        }
    };

    println!("Generating quests... (mode={})", mode);
    let generated = engine.generate(&goal, count, mode);
    if generated.len() < count {
        println!(
            "(mock catalog holds {} quests; returning {})",
            generated.len(),
            generated.len()
        );
    }
    for (i, g) in generated.iter().enumerate() {
        println!(
            "\n[{}] {} ({} pts, {})\n    {}",
            i + 1,
            g.name,
            g.points,
            g.difficulty,
            g.description
        );
    }
    if generated.is_empty() {
        return;
    }

    if input_choice("\nAdd all generated quests to your list? (y/n): ").eq_ignore_ascii_case("y") {
        let total = generated.len();
        adopt(tracker, username, generated);
        println!("Added {} quests to {}.", total, username);
        return;
    }
    let pick = input_choice("Enter numbers to add (comma-separated), or press Enter to skip: ");
    if pick.is_empty() {
        return;
    }
    let chosen: Vec<GeneratedQuest> = pick
        .split(',')
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter(|&idx| idx >= 1 && idx <= generated.len())
        .map(|idx| generated[idx - 1].clone())
        .collect();
    if !chosen.is_empty() {
        adopt(tracker, username, chosen);
        println!("Selected quests added.");
    }
}

fn adopt(tracker: &mut QuestTracker, username: &str, generated: Vec<GeneratedQuest>) {
    for g in generated {
        // Generated names already satisfy validation; log and skip otherwise
        if let Err(e) = tracker.add_quest(username, Quest::from(g)) {
            warn!("skipping generated quest: {}", e);
        }
    }
}
