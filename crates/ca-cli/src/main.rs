//! # ca CLI
//!
//! A small interactive front end for the reaction/diffusion/rotation
//! cellular-automaton engine.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive mode (recommended)
//! ca
//!
//! # Run a simulation spec
//! ca run spec.json --seed 42 --output ./out
//!
//! # Check a spec is well-formed without running it
//! ca validate spec.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input};
use indicatif::{ProgressBar, ProgressStyle};

use ca_core::{ProgressEvent, ProgressSink};
use ca_transport::SimulationSpec;

static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Reaction/diffusion/rotation cellular-automaton engine
#[derive(Parser)]
#[command(name = "ca")]
#[command(author = "CA Engine Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Run reactive/diffusive/orientational cellular-automaton simulations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation spec and write its history + molar-fraction CSV
    Run {
        /// Path to a JSON simulation spec
        spec: PathBuf,

        /// RNG seed (defaults to 0 for reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory (defaults to `./output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a spec file without running it
    Validate {
        /// Path to a JSON simulation spec
        spec: PathBuf,
    },

    /// Interactive mode (default)
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let command = cli.command.unwrap_or(Commands::Interactive);
    match command {
        Commands::Interactive => run_interactive()?,
        Commands::Run { spec, seed, output } => run_simulation(&spec, seed, output)?,
        Commands::Validate { spec } => validate_spec(&spec)?,
    }

    Ok(())
}

fn run_interactive() -> Result<()> {
    println!();
    println!("{}", style("╔══════════════════════════════════════════════════════════════╗").cyan());
    println!("{}", style("║         CA ENGINE - Reaction / Diffusion / Rotation           ║").cyan());
    println!("{}", style("╚══════════════════════════════════════════════════════════════╝").cyan());
    println!();

    let theme = ColorfulTheme::default();
    loop {
        let options = vec!["▶ Run a simulation spec", "🔍 Validate a spec file", "🚪 Exit"];
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt("Select an action")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Spec file path")
                    .interact_text()?;
                let seed: u64 = Input::with_theme(&theme)
                    .with_prompt("RNG seed")
                    .default(0)
                    .interact_text()?;
                run_simulation(Path::new(&path), Some(seed), None)?;
            }
            1 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Spec file path")
                    .interact_text()?;
                validate_spec(Path::new(&path))?;
            }
            2 => {
                println!("\n{}Goodbye!", SPARKLE);
                break;
            }
            _ => unreachable!(),
        }
        println!();
    }

    Ok(())
}

fn load_spec(path: &Path) -> Result<SimulationSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading spec file {}", path.display()))?;
    let spec: SimulationSpec = serde_json::from_str(&text)
        .with_context(|| format!("parsing spec file {}", path.display()))?;
    Ok(spec)
}

fn validate_spec(path: &Path) -> Result<()> {
    println!("\n{}Validating {}", GEAR, style(path.display()).cyan());
    let spec = load_spec(path)?;
    match spec.build_engine() {
        Ok(engine) => {
            println!(
                "{}'{}' is valid: {}x{} grid, {} iterations, NCELL={}",
                CHECK,
                style(&spec.name).bold(),
                spec.grid_height,
                spec.grid_width,
                spec.iterations_number,
                engine.ncell()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}'{}' is invalid: {}", CROSS, spec.name, e);
            Err(anyhow::anyhow!(e))
        }
    }
}

fn run_simulation(path: &Path, seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let spec = load_spec(path)?;
    let seed = seed.unwrap_or(0);
    let output_dir = output.unwrap_or_else(|| PathBuf::from("output"));

    println!("\n{}Simulation: {}", GEAR, style(&spec.name).bold().cyan());
    println!("  Grid: {}x{}", spec.grid_height, spec.grid_width);
    println!("  Iterations: {}", spec.iterations_number);
    println!("  Ingredients: {}", spec.ingredients.len());
    println!("  Seed: {}", seed);

    let engine = spec.build_engine().map_err(|e| anyhow::anyhow!(e))?;

    let pb = create_progress_bar(spec.iterations_number as u64);
    let mut sink = CliProgressSink { bar: pb.clone() };
    let result = engine.run(seed, &mut sink).map_err(|e| anyhow::anyhow!(e))?;
    pb.finish_and_clear();

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let history: Vec<Vec<Vec<i16>>> = result.history.iter().map(|g| g.to_rows()).collect();
    let history_path = output_dir.join("history.json");
    fs::write(&history_path, serde_json::to_vec(&history)?)
        .with_context(|| format!("writing {}", history_path.display()))?;

    let csv = ca_transport::to_csv(&result.molar_fractions);
    let csv_path = output_dir.join("molar_fractions.csv");
    fs::write(&csv_path, csv).with_context(|| format!("writing {}", csv_path.display()))?;

    println!(
        "\n{}Done: wrote {} snapshots to {} and the molar-fraction table to {}",
        CHECK,
        result.history.len(),
        style(history_path.display()).cyan(),
        style(csv_path.display()).cyan()
    );
    Ok(())
}

/// Drives an [`indicatif::ProgressBar`] off engine progress events.
struct CliProgressSink {
    bar: ProgressBar,
}

impl ProgressSink for CliProgressSink {
    fn emit(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Tick { iteration, total } => {
                self.bar.set_position(iteration as u64);
                self.bar.set_message(format!("{iteration}/{total}"));
            }
            ProgressEvent::ProcessingResults => {
                self.bar.set_message("processing results...".to_string());
            }
            ProgressEvent::Completed => {
                self.bar.set_message("complete".to_string());
            }
        }
    }
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
