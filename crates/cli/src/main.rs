//! CLI for deck generation: serve the MCP tool over stdio, run a one-shot
//! generation, or print a prompt template.

use anyhow::Result;
use clap::{Parser, Subcommand};
use deck_core::presentation_prompt;
use deck_server::{run_generate, McpServer};
use std::io;

/// Generate PowerPoint decks from JSON descriptions.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server over stdio
    Serve,

    /// Generate a presentation from inline JSON or a JSON file
    Generate {
        /// Inline JSON deck description, or a path to a JSON file
        input: String,

        /// Output directory for the .pptx
        #[arg(short, long, default_value = "presentation")]
        output_dir: String,
    },

    /// Print the prompt template for producing deck JSON
    Prompt {
        /// Presentation topic
        topic: String,

        /// Audience tone: business, student, teacher, or child
        #[arg(short, long, default_value = "student")]
        tone: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging goes to stderr; in serve mode stdout belongs to the protocol.
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Serve => {
            log::info!("Serving MCP on stdio");
            let stdin = io::stdin();
            let stdout = io::stdout();
            McpServer::new().run(stdin.lock(), stdout.lock())?;
        }
        Command::Generate { input, output_dir } => match run_generate(&input, &output_dir) {
            Ok(path) => {
                println!("Presentation successfully saved as: {}", path.display());
            }
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        Command::Prompt { topic, tone } => {
            println!("{}", presentation_prompt(&topic, &tone));
        }
    }

    Ok(())
}
