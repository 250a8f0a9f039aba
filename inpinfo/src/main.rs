//! Dumps information on the materials of an input deck: which cards each one
//! has, their variants and how many data rows.

#![allow(clippy::needless_return)]

use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use inp::prelude::*;
use log::{LevelFilter, info, error};

#[derive(Parser)]
#[command(author, version)]
struct Cli {
  /// Output extra/debug info while parsing.
  #[arg(short, long)]
  verbose: bool,
  /// File path (set to "-" to read from standard input).
  file: PathBuf
}

const INDENT: &str = "  ";

/// One line describing a property.
fn describe(prop: &PropertyRecord) -> String {
  let rows = prop.flat_rows().len();
  let mods = prop.modifiers().to_keyword_text();
  let label = match prop.card_type() {
    CardType::Unparsed => format!("*{} (not interpreted)", prop.keyword()),
    ct => format!("*{} ({})", prop.keyword(), ct.desc()),
  };
  let mut line = if mods.is_empty() {
    label
  } else {
    format!("{} [{}]", label, mods)
  };
  line.push_str(&match rows {
    0 => ": no data".to_owned(),
    1 => ": 1 row".to_owned(),
    n => format!(": {} rows", n),
  });
  return line;
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
  // parse the file
  let parsed = if args.file.as_os_str().eq_ignore_ascii_case("-") {
    DeckParser::parse_bufread(BufReader::new(io::stdin()))
  } else if args.file.is_file() {
    if let Some(sbn) = args.file.file_name().and_then(|s| s.to_str()) {
      info!("Parsing {}...", sbn);
    }
    DeckParser::parse_file(&args.file)
  } else {
    error!("Provided path either does not exist or is not a file!");
    std::process::exit(1);
  };
  let model = match parsed {
    Ok(m) => m,
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    },
  };
  info!("Done parsing.");
  if model.is_empty() {
    info!("No materials were found.");
    return;
  }
  info!("Found {} materials:", model.len());
  for mat in model.iter() {
    info!("{}- {} (line {}):", INDENT, mat.name, mat.line);
    if mat.properties.is_empty() {
      info!("{}{}- no properties", INDENT, INDENT);
    }
    for prop in mat.properties.iter() {
      info!("{}{}- {}", INDENT, INDENT, describe(prop));
    }
  }
  let unparsed = model.iter()
    .flat_map(|m| m.properties_of(CardType::Unparsed))
    .count();
  if unparsed > 0 {
    info!("{} properties were kept without being interpreted.", unparsed);
  }
}
