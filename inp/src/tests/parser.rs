use std::io::Cursor;

use crate::parser::DeckParser;

#[test]
fn latin1_comments() {
  let bytes: &[u8] = b"** Temp\xe9rature en \xb0C\r\n*MATERIAL, NAME=A\r\n*DENSITY\r\n1.\r\n";
  let model = DeckParser::parse_bufread(Cursor::new(bytes)).unwrap();
  assert_eq!(model.names(), vec!["A"]);
  assert_eq!(model.total_properties(), 1);
  // no newline at the end of the last line
  let model = DeckParser::parse_bufread(Cursor::new(b"*MATERIAL, NAME=B\n*DENSITY\n2.")).unwrap();
  assert_eq!(model.get("b").unwrap().properties.len(), 1);
}

#[test]
fn bufread_matches_str() {
  let deck = super::SAMPLE_DECK;
  let from_reader = DeckParser::parse_bufread(Cursor::new(deck.as_bytes())).unwrap();
  assert_eq!(from_reader, DeckParser::parse_str(deck).unwrap());
}
