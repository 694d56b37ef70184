// ABOUTME: Main entry point for the deck-slides program.
// ABOUTME: Provides a CLI for inspecting and rendering normalized decks.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a deck source and print the normalized slide records as JSON
    Inspect(InspectArgs),

    /// Parse a deck source and write a standalone HTML document
    Render(RenderArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Path to the source document
    #[arg(short, long)]
    input: PathBuf,

    /// Source type: 'html', 'markdown' or 'json'
    #[arg(short, long, default_value = "markdown")]
    source: String,
}

#[derive(Args)]
struct RenderArgs {
    /// Path to the source document
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Source type: 'html', 'markdown' or 'json'
    #[arg(short, long, default_value = "markdown")]
    source: String,

    /// Document title
    #[arg(short, long, default_value = "Presentation")]
    title: String,
}

fn load_slides(input: &PathBuf, source: &str) -> anyhow::Result<Vec<deck::SlideRecord>> {
    let source = deck::Source::from_str(source)?;
    let data = fs::read_to_string(input)
        .with_context(|| format!("Failed to read source file {:?}", input))?;

    let config = deck::Config {
        source,
        data: Some(data),
        ..deck::Config::default()
    };
    let slides = deck::Parser::new(&config).load_and_parse()?;
    Ok(slides)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Inspect(args)) => {
            let slides = load_slides(&args.input, &args.source)?;
            let rendered = serde_json::to_string_pretty(&slides)
                .context("Failed to serialize slide records")?;
            println!("{}", rendered);
            Ok(())
        }
        Some(Commands::Render(args)) => {
            let slides = load_slides(&args.input, &args.source)?;
            let html = deck::render_document(&args.title, &slides)?;
            fs::write(&args.output, html)
                .with_context(|| format!("Failed to write output file {:?}", args.output))?;
            println!("Deck rendered successfully: {:?}", args.output);
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
