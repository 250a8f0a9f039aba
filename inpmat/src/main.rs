//! A command-line application to extract the materials of a keyword-format
//! input deck into JSON, CSV or clean keyword text, optionally converting
//! their units along the way.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use inp::export::{json, keyword};
use inp::prelude::*;
use log::*;
use mat_csv::prelude::*;

/// The output formats.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "snake_case")]
enum OutputFormat {
  /// A JSON object keyed by material name.
  #[default]
  Json,
  /// One CSV record per data row.
  Csv,
  /// Keyword text, ready to be included in a deck.
  Inp,
}

/// The arguments passed to the extractor.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// Unit system the deck is written in. Needs --to.
  #[arg(long = "from", requires = "to_units")]
  from_units: Option<UnitSystem>,
  /// Unit system to convert the materials to. Needs --from.
  #[arg(long = "to", requires = "from_units")]
  to_units: Option<UnitSystem>,
  /// Output format.
  #[arg(short = 'f', long = "format", default_value = "json")]
  format: OutputFormat,
  /// The delimiter used in the CSV.
  #[arg(short = 'd', long = "delim", default_value = ",")]
  delim: char,
  /// Enable writing CSV headers. Be warned, they're written every time there's
  /// a change.
  #[arg(short = 'H', long = "headers")]
  headers: bool,
  /// CSV number formatting.
  #[command(flatten)]
  formatting: CsvFormatting,
  /// Output extra/debug info while parsing and converting.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// Path to write output to. If absent, writes to standard output.
  #[arg(short = 'o')]
  output: Option<PathBuf>,
  /// The input deck. If -, reads from standard input.
  input: PathBuf,
}

/// Reads the deck named in the arguments.
fn read_deck(args: &Cli) -> Result<MaterialModel, InpError> {
  if args.input.as_os_str().eq_ignore_ascii_case("-") {
    return DeckParser::parse_bufread(BufReader::new(io::stdin()));
  }
  if !args.input.is_file() {
    error!("Provided path either does not exist or is not a file!");
    std::process::exit(1);
  }
  if let Some(bn) = args.input.file_name().and_then(|s| s.to_str()) {
    info!("Parsing {}...", bn);
  }
  return DeckParser::parse_file(&args.input);
}

/// Does the actual work.
fn run(args: &Cli) -> Result<(), InpError> {
  let mut model = read_deck(args)?;
  info!(
    "Done parsing: {} materials, {} properties.",
    model.len(),
    model.total_properties()
  );
  if let (Some(from), Some(to)) = (args.from_units, args.to_units) {
    info!("Converting from {} to {}...", from, to);
    model = model.converted(from, to)?;
  }
  let mut output: BufWriter<Box<dyn Write>> = BufWriter::new(
    if let Some(ref op) = args.output {
      Box::new(File::create(op)?)
    } else {
      Box::new(io::stdout())
    }
  );
  match args.format {
    OutputFormat::Json => {
      writeln!(output, "{}", json::to_json(&model)?)?;
    },
    OutputFormat::Inp => {
      write!(output, "{}", keyword::to_keyword_text(&model))?;
    },
    OutputFormat::Csv => {
      let delimiter: u8 = match args.delim.try_into() {
        Ok(d) => d,
        Err(_) => {
          error!("Delimiter must be a single-byte character!");
          std::process::exit(1);
        },
      };
      let opts = CsvOptions {
        headers: args.headers,
        delimiter,
        formatting: args.formatting,
      };
      info!("Writing CSV records...");
      let n = write_csv(&model, &mut output, &opts).map_err(io::Error::from)?;
      debug!("{} records written.", n);
    },
  };
  output.flush()?;
  info!("All done.");
  return Ok(());
}

fn main() {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  if let Err(e) = run(&args) {
    error!("{}", e);
    std::process::exit(1);
  }
}
