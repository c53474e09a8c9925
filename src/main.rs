use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use lyre::{analyze, cents_difference, render, Analysis, RenderOptions};

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("must be a positive number (got {})", s))
    }
}

/// Tune chord sequences in Pythagorean intonation and export them as MIDI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print Pythagorean and equal-temperament frequencies for every chord
    Analyze {
        /// Chord sequence file
        input: PathBuf,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write <stem>_pythagorean.mid and <stem>_equal.mid
    Export {
        /// Chord sequence file
        input: PathBuf,

        /// Directory for the .mid files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Tempo in BPM (overrides front matter)
        #[arg(long, value_parser = parse_positive)]
        tempo: Option<f64>,

        /// Seconds per duration unit (overrides front matter)
        #[arg(long, value_parser = parse_positive)]
        base_duration: Option<f64>,
    },
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading file '{}'", path.display()))
}

fn print_analysis(analysis: &Analysis) {
    if let Some(title) = &analysis.metadata.title {
        println!("{}", title);
        println!();
    }

    for (i, analyzed) in analysis.chords.iter().enumerate() {
        let chord = &analyzed.chord;
        let result = &analyzed.result;
        println!(
            "Chord {}: {} ({:.3} Hz), duration {}",
            i + 1,
            chord.fundamental,
            result.fundamental_freq,
            chord.duration
        );
        for (pyth, et) in result
            .pythagorean_notes
            .iter()
            .zip(&result.equal_temperament_notes)
        {
            println!(
                "  {:>4}  ratio {:>9.6}  pythagorean {:>10.3} Hz  equal {:>10.3} Hz  {:>+7.2} cents",
                pyth.interval,
                pyth.ratio,
                pyth.frequency,
                et.frequency,
                cents_difference(pyth.frequency, et.frequency)
            );
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Error writing to '{}'", path.display()))?;
    eprintln!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Analyze { input, json } => {
            let source = read_source(&input)?;
            let analysis = analyze(&source).context("Analysis failed")?;
            info!("Analyzed {} chords from {}", analysis.chords.len(), input.display());

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Commands::Export {
            input,
            out_dir,
            tempo,
            base_duration,
        } => {
            let source = read_source(&input)?;
            let options = RenderOptions {
                tempo,
                base_duration,
            };
            let rendering = render(&source, &options).context("Export failed")?;
            info!(
                "Rendering {} chords at {} BPM, {} s per duration unit",
                rendering.analysis.chords.len(),
                rendering.settings.tempo,
                rendering.settings.base_duration
            );

            if !out_dir.is_dir() {
                bail!("Output directory '{}' does not exist", out_dir.display());
            }
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "sequence".to_string());

            write_file(
                &out_dir.join(format!("{}_pythagorean.mid", stem)),
                &rendering.pythagorean,
            )?;
            write_file(
                &out_dir.join(format!("{}_equal.mid", stem)),
                &rendering.equal_temperament,
            )?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
