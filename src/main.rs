use chordsheet::{convert, distinct_chords, parse_song, Dialect, Format, FormatOptions};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

/// Convert, transpose and inspect chord sheets.
#[derive(Debug, Parser)]
#[command(name = "chordsheet", version)]
struct Args {
    /// Input dialect: chordpro, chords-over-words (text) or raw.
    #[arg(long, default_value = "chordpro")]
    from: Dialect,

    /// Output format: chordpro, text or html.
    #[arg(long, default_value = "chordpro")]
    to: Format,

    /// Semitones to transpose every chord by.
    #[arg(long, allow_hyphen_values = true)]
    transpose: Option<i32>,

    /// Render add9 triads as 2.
    #[arg(long)]
    simplify: bool,

    /// Leave tab sections out of the output.
    #[arg(long)]
    no_tabs: bool,

    /// YAML file with default options (transpose, include-tabs, simplify).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the distinct chords, one per line, instead of converting.
    #[arg(long, conflicts_with = "json")]
    chords: bool,

    /// Print the parsed song as JSON instead of converting.
    #[arg(long)]
    json: bool,

    /// Input file; reads standard input when omitted.
    input: Option<PathBuf>,

    /// Output file; writes standard output when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let source = match &args.input {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading standard input: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let options = load_options(&args);

    let result = if args.chords || args.json {
        parse_song(&source, args.from).map(|song| {
            if args.chords {
                distinct_chords(&song).join("\n")
            } else {
                serde_json::to_string_pretty(&song).unwrap_or_else(|e| {
                    eprintln!("Error serializing song: {}", e);
                    process::exit(1);
                })
            }
        })
    } else {
        convert(&source, args.from, args.to, &options)
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", output)) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {} to {}", args.to, path.display());
        }
        None => println!("{}", output),
    }
}

/// Options file first, then command-line overrides.
fn load_options(args: &Args) -> FormatOptions {
    let mut options = match &args.config {
        Some(path) => {
            let yaml = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config '{}': {}", path.display(), e);
                process::exit(1);
            });
            FormatOptions::from_yaml(&yaml).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                process::exit(1);
            })
        }
        None => FormatOptions::default(),
    };

    if let Some(transpose) = args.transpose {
        options.transpose = transpose;
    }
    if args.simplify {
        options.simplify = true;
    }
    if args.no_tabs {
        options.include_tabs = false;
    }
    options
}
