use crate::blocks::*;
use crate::errors::{ErrorKind, InpError};
use crate::lines::logical_lines;
use crate::parser::DeckParser;

/// Runs the assembler over a text, collecting the material blocks.
fn assemble(text: &str) -> Result<Vec<MaterialBlock>, InpError> {
  let mut asm = BlockAssembler::new();
  let mut mats: Vec<MaterialBlock> = Vec::new();
  for ll in logical_lines(text) {
    mats.extend(asm.consume(&ll?)?);
  }
  mats.extend(asm.finish());
  return Ok(mats);
}

#[test]
fn keyword_lines() {
  let (kw, mods) = parse_keyword_line("*Elastic,  type = Orthotropic");
  assert_eq!(kw, "ELASTIC");
  assert_eq!(mods.get("TYPE"), Some("Orthotropic"));
  assert_eq!(mods.get("type"), Some("Orthotropic"));
  let (kw, mods) = parse_keyword_line("*specific   heat");
  assert_eq!(kw, "SPECIFIC HEAT");
  assert!(mods.is_empty());
  let (_, mods) = parse_keyword_line("*MATERIAL, NAME=\"my, mat\"");
  assert_eq!(mods.get("NAME"), Some("my, mat"));
  let (_, mods) = parse_keyword_line("*HYPERELASTIC, mooney-rivlin, n=1");
  assert!(mods.has("MOONEY-RIVLIN"));
  assert_eq!(mods.get("MOONEY-RIVLIN"), Some(""));
  assert_eq!(mods.keys().collect::<Vec<_>>(), vec!["MOONEY-RIVLIN", "N"]);
}

#[test]
fn modifier_text() {
  let mut mods = Modifiers::new();
  mods.set("name", "my mat");
  mods.set("NEO HOOKE", "");
  mods.set("zero", "20.");
  assert_eq!(mods.to_keyword_text(), "NAME=\"my mat\", NEO HOOKE, ZERO=20.");
  let (_, back) = parse_keyword_line(&format!("*X, {}", mods.to_keyword_text()));
  assert_eq!(back, mods);
}

#[test]
fn modifier_approx_eq() {
  let (_, a) = parse_keyword_line("*D, ALPHA=0.5, TYPE=iso");
  let (_, b) = parse_keyword_line("*D, ALPHA=5.e-1, TYPE=ISO");
  let (_, c) = parse_keyword_line("*D, TYPE=ISO, ALPHA=0.5");
  assert!(a.approx_eq(&b, 1e-12));
  assert!(!a.approx_eq(&c, 1e-12));
  assert!(approx_eq_f64(1.0, 1.0 + 1e-13, 1e-12));
  assert!(!approx_eq_f64(1.0, 1.001, 1e-6));
}

#[test]
fn material_scopes() {
  let mats = assemble(super::SAMPLE_DECK).unwrap();
  assert_eq!(mats.len(), 2);
  assert_eq!(mats[0].name, "Steel");
  assert_eq!(mats[0].line, 4);
  let kws = mats[0].blocks.iter().map(|b| b.keyword.as_str()).collect::<Vec<_>>();
  assert_eq!(kws, vec!["DENSITY", "ELASTIC", "PLASTIC", "EXPANSION", "DAMPING"]);
  assert_eq!(mats[0].blocks[1].rows.len(), 2);
  assert_eq!(mats[0].blocks[1].rows[1].fields, vec!["2.0e11", "0.3", "200."]);
  // the section and the step close the second material
  assert_eq!(mats[1].name, "Rubber A");
  assert_eq!(mats[1].blocks.len(), 2);
}

#[test]
fn rows_keep_text() {
  let mats = assemble("*MATERIAL, NAME=A\n*ELASTIC\n 2.1E+11 ,  , 20.\n").unwrap();
  let row = &mats[0].blocks[0].rows[0];
  assert_eq!(row.fields, vec!["2.1E+11", "", "20."]);
  assert_eq!(row.line, 3);
  assert_eq!(row.first_width, 3);
}

#[test]
fn assembler_errors() {
  let missing = assemble("*MATERIAL\n*DENSITY\n1.\n").unwrap_err();
  assert_eq!(missing.kind(), ErrorKind::MissingName);
  let empty = assemble("*MATERIAL, NAME=\n").unwrap_err();
  assert_eq!(empty.kind(), ErrorKind::MissingName);
  let stray = assemble("*MATERIAL, NAME=A\n1., 2.\n").unwrap_err();
  assert_eq!(stray.kind(), ErrorKind::MalformedLine);
  assert_eq!(stray.line(), Some(2));
}

#[test]
fn duplicate_names() {
  let deck = "*Material, name=steel\n*Density\n1.\n*MATERIAL, NAME=STEEL\n*Density\n2.\n";
  match DeckParser::parse_str(deck) {
    Err(InpError::DuplicateMaterialName { line, first_line, .. }) => {
      assert_eq!(line, 4);
      assert_eq!(first_line, 1);
    },
    other => panic!("expected a duplicate name error, got {:?}", other),
  }
  // different names are fine
  let deck = deck.replace("NAME=STEEL", "NAME=STEEL2");
  assert_eq!(DeckParser::parse_str(&deck).unwrap().len(), 2);
}
