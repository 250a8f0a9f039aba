use inp::prelude::*;

use crate::prelude::*;

/// A deck with cards of different widths.
const DECK: &str = "\
*MATERIAL, NAME=Steel
*DENSITY
7800.
*ELASTIC
2.1e11, 0.3, 20.
2.0e11, 0.3, 200.
*MATERIAL, NAME=Sub
*USER MATERIAL, CONSTANTS=0
*DEPVAR
4
*CREEP, LAW=TIME
1.e-20, , 0.
";

/// Writes the test deck to a string.
fn write_deck(opts: &CsvOptions) -> String {
  let model = DeckParser::parse_str(DECK).unwrap();
  let mut buf: Vec<u8> = Vec::new();
  write_csv(&model, &mut buf, opts).unwrap();
  return String::from_utf8(buf).unwrap();
}

#[test]
fn records() {
  let model = DeckParser::parse_str(DECK).unwrap();
  let recs = to_records(&model);
  assert_eq!(recs.len(), 6);
  assert_eq!(recs[1].material, "Steel");
  assert_eq!(recs[1].property, "ELASTIC");
  assert_eq!(recs[1].row, 1);
  assert_eq!(recs[2].row, 2);
  assert_eq!(recs[2].columns, vec!["E", "NU", "TEMP"]);
  assert_eq!(recs[2].fields[2], CsvField::Real(200.0));
  // a umat without constants still shows up
  assert_eq!(recs[3].property, "USER MATERIAL");
  assert_eq!(recs[3].row, 0);
  assert!(recs[3].fields.is_empty());
  assert_eq!(recs[4].fields, vec![CsvField::Integer(4)]);
  assert_eq!(recs[5].fields[1], CsvField::Blank);
}

#[test]
fn headers_on_change() {
  let text = write_deck(&CsvOptions::default());
  let lines = text.lines().collect::<Vec<_>>();
  assert_eq!(lines[0], "material,property,modifiers,row,RHO,TEMP");
  assert_eq!(lines[1], "Steel,DENSITY,,1,7800,");
  assert_eq!(lines[2], "material,property,modifiers,row,E,NU,TEMP");
  assert_eq!(lines[3], "Steel,ELASTIC,,1,210000000000,0.3,20");
  // same columns, no new header
  assert_eq!(lines[4], "Steel,ELASTIC,,2,200000000000,0.3,200");
  assert_eq!(lines[5], "material,property,modifiers,row");
  assert_eq!(lines[6], "Sub,USER MATERIAL,CONSTANTS=0,0");
  assert_eq!(lines[8], "Sub,DEPVAR,,1,4");
  assert_eq!(lines[10], "Sub,CREEP,LAW=TIME,1,1e-20,,0");
  assert_eq!(lines.len(), 11);
}

#[test]
fn formatting_options() {
  let opts = CsvOptions {
    headers: false,
    delimiter: b';',
    formatting: CsvFormatting {
      reals: FloatFormat { dec_places: Some(2), scientific: true, big_e: true },
      blanks: BlankDisplay::Dash,
    },
  };
  let text = write_deck(&opts);
  let lines = text.lines().collect::<Vec<_>>();
  assert_eq!(lines.len(), 6);
  assert_eq!(lines[0], "Steel;DENSITY;;1;7.80E3;-");
  assert_eq!(lines[5], "Sub;CREEP;LAW=TIME;1;1.00E-20;-;0.00E0");
}

#[test]
fn fixed_columns_per_property() {
  let deck = "\
*MATERIAL, NAME=M
*ELASTIC, DEPENDENCIES=1
2.1e11, 0.3, 20., 1.
2.0e11, 0.3
*DAMPING, BETA=1.e-4
";
  let model = DeckParser::parse_str(deck).unwrap();
  let recs = to_records(&model);
  assert_eq!(recs.len(), 3);
  assert_eq!(recs[0].columns, vec!["E", "NU", "TEMP", "FV1"]);
  assert_eq!(recs[1].columns, recs[0].columns);
  assert_eq!(recs[1].fields[2], CsvField::Blank);
  assert_eq!(recs[1].fields[3], CsvField::Blank);
  assert_eq!(recs[2].columns, vec!["ALPHA", "BETA", "COMPOSITE", "STRUCTURAL"]);
  assert_eq!(recs[2].fields[0], CsvField::Blank);
  assert_eq!(recs[2].fields[1], CsvField::Real(1e-4));
  let mut buf: Vec<u8> = Vec::new();
  write_csv(&model, &mut buf, &CsvOptions::default()).unwrap();
  let text = String::from_utf8(buf).unwrap();
  let lines = text.lines().collect::<Vec<_>>();
  // one header for both elastic rows
  assert_eq!(lines[0], "material,property,modifiers,row,E,NU,TEMP,FV1");
  assert_eq!(lines[1], "M,ELASTIC,DEPENDENCIES=1,1,210000000000,0.3,20,1");
  assert_eq!(lines[2], "M,ELASTIC,DEPENDENCIES=1,2,200000000000,0.3,,");
  assert_eq!(lines[3], "material,property,modifiers,row,ALPHA,BETA,COMPOSITE,STRUCTURAL");
  assert_eq!(lines[4], "M,DAMPING,BETA=1.e-4,1,,0.0001,,");
  assert_eq!(lines.len(), 5);
}
