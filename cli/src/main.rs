//! pdfsieve CLI - persona-driven PDF section extraction and ranking

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use pdfsieve::{
    process_run_with_options, HashedEmbedder, JsonFormat, PipelineOptions, RunInput,
};

#[derive(Parser)]
#[command(name = "pdfsieve")]
#[command(version)]
#[command(about = "Rank PDF sections by relevance to a persona and task", long_about = None)]
struct Cli {
    /// Input directory holding input.json and the PDF documents
    #[arg(short, long, value_name = "DIR", default_value = "input", env = "PDFSIEVE_INPUT")]
    input: PathBuf,

    /// Output directory for output.json
    #[arg(short, long, value_name = "DIR", default_value = "output", env = "PDFSIEVE_OUTPUT")]
    output: PathBuf,

    /// Run configuration filename inside the input directory
    #[arg(long, value_name = "FILE", default_value = "input.json")]
    config: String,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Number of sections to retain
    #[arg(long, default_value = "5")]
    top_sections: usize,

    /// Number of sentences to keep per retained section
    #[arg(long, default_value = "5")]
    top_sentences: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.input.join(&cli.config);
    let config = fs::read_to_string(&config_path)
        .map_err(|e| format!("cannot read {}: {}", config_path.display(), e))?;
    let input: RunInput = serde_json::from_str(&config)?;

    log::info!(
        "processing {} documents for persona '{}'",
        input.documents.len(),
        input.persona.role
    );

    let options = PipelineOptions::new()
        .with_top_sections(cli.top_sections)
        .with_top_sentences(cli.top_sentences);
    let output = process_run_with_options(
        &input,
        &cli.input,
        Box::new(HashedEmbedder::new()),
        options,
    )?;

    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = pdfsieve::report::to_json(&output, format)?;

    fs::create_dir_all(&cli.output)?;
    let output_path = cli.output.join("output.json");
    fs::write(&output_path, json)?;

    println!(
        "{} {} section(s), {} refined extract(s) -> {}",
        "done:".green().bold(),
        output.extracted_sections.len(),
        output.subsection_analysis.len(),
        output_path.display()
    );
    Ok(())
}
