//! This module implements the conversion from a material model into CSV
//! records, and the writer that puts them out.

use std::io::Write;

use inp::prelude::*;
use log::debug;

use crate::prelude::*;

/// Options for writing a CSV file.
#[derive(Clone, Debug)]
pub struct CsvOptions {
  /// Whether to write a header every time the column set changes.
  pub headers: bool,
  /// The field delimiter.
  pub delimiter: u8,
  /// How to print the fields.
  pub formatting: CsvFormatting,
}

impl Default for CsvOptions {
  fn default() -> Self {
    return Self {
      headers: true,
      delimiter: b',',
      formatting: CsvFormatting::default(),
    };
  }
}

/// Turns one property into CSV records, one per data row. Every row of a
/// property gets the same columns: the base ones, then the temperature and
/// field variables, blank where a row doesn't have them. A property with no
/// rows still gets a record.
pub fn property_records(material: &str, prop: &PropertyRecord) -> Vec<CsvRecord> {
  let base = CsvRecord {
    material: material.to_owned(),
    property: prop.keyword(),
    modifiers: prop.modifiers().to_keyword_text(),
    row: 0,
    columns: Vec::new(),
    fields: Vec::new(),
  };
  let rows = prop.flat_rows();
  if rows.is_empty() {
    return vec![base];
  }
  let columns = prop.columns()
    .into_iter()
    .chain(prop.optional_columns())
    .collect::<Vec<_>>();
  return rows.into_iter().enumerate().map(|(i, mut row)| {
    let fields = columns.iter().map(|col| {
      return match row.iter().position(|(c, _)| c == col) {
        Some(j) => CsvField::from(row.swap_remove(j).1),
        None => CsvField::Blank,
      };
    }).collect::<Vec<_>>();
    CsvRecord {
      row: i + 1,
      columns: columns.clone(),
      fields,
      ..base.clone()
    }
  }).collect();
}

/// Turns a whole model into CSV records, in deck order.
pub fn to_records(model: &MaterialModel) -> Vec<CsvRecord> {
  return model.iter()
    .flat_map(|m| {
      m.properties.iter().flat_map(move |p| property_records(&m.name, p))
    })
    .collect();
}

/// Writes a model as CSV. Returns the number of data records written.
pub fn write_csv<W: Write>(
  model: &MaterialModel,
  writer: W,
  opts: &CsvOptions
) -> Result<usize, csv::Error> {
  let mut wtr = csv::WriterBuilder::new()
    .delimiter(opts.delimiter)
    .flexible(true)
    .from_writer(writer);
  let mut last_header: Option<Vec<String>> = None;
  let mut count: usize = 0;
  for rec in to_records(model) {
    if opts.headers {
      let cur_header = rec.header_as_iter()
        .map(String::from)
        .collect::<Vec<_>>();
      if last_header.as_ref() != Some(&cur_header) {
        // header change
        wtr.write_record(&cur_header)?;
        last_header = Some(cur_header);
      }
    }
    wtr.write_record(rec.to_fields().map(|f| opts.formatting.to_string(f)))?;
    count += 1;
  }
  wtr.flush()?;
  debug!("Wrote {} CSV records.", count);
  return Ok(count);
}
