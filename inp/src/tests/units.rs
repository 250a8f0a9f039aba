use crate::cards::*;
use crate::errors::{ErrorKind, InpError};
use crate::parser::DeckParser;
use crate::units::*;

/// Relative tolerance for conversions.
const REL_TOL: f64 = 1e-12;

/// Asserts two numbers are within the tolerance.
fn assert_close(a: f64, b: f64) {
  assert!((a - b).abs() <= REL_TOL * a.abs().max(b.abs()), "{} != {}", a, b);
}

#[test]
fn stems_and_lookup() {
  assert_eq!(column_stem("D1111"), "D");
  assert_eq!(column_stem("MU2"), "MU");
  assert_eq!(column_stem("YIELD STRESS"), "YIELD STRESS");
  let lookup = |ct, col| lookup_dimension(ct, col);
  assert_eq!(lookup(CardType::Elastic, "E"), Some(DimensionTag::Pressure));
  assert_eq!(lookup(CardType::Elastic, "NU12"), Some(DimensionTag::Dimensionless));
  assert_eq!(lookup(CardType::Elastic, "D2323"), Some(DimensionTag::Pressure));
  assert_eq!(lookup(CardType::Hyperelastic, "D1"), Some(DimensionTag::InversePressure));
  assert_eq!(lookup(CardType::Density, "TEMP"), Some(DimensionTag::Temperature));
  assert_eq!(lookup(CardType::Elastic, "FV3"), Some(DimensionTag::Dimensionless));
  assert_eq!(lookup(CardType::DamageEvolution, "U"), Some(DimensionTag::Length));
  assert_eq!(lookup(CardType::UserMaterial, "PROPS1"), None);
  assert_eq!(lookup(CardType::Unparsed, "FIELD1"), None);
}

#[test]
fn factors() {
  let (si, eng) = (UnitSystem::Si, UnitSystem::Engineering);
  assert_close(factor(DimensionTag::Pressure, si, eng), 1e-6);
  assert_close(factor(DimensionTag::Density, si, eng), 1e-12);
  assert_close(factor(DimensionTag::Length, si, eng), 1e3);
  assert_close(factor(DimensionTag::InversePressure, si, eng), 1e6);
  assert_close(factor(DimensionTag::FractureEnergy, si, eng), 1e-3);
  assert_close(factor(DimensionTag::SpecificHeat, si, eng), 1e6);
  assert_close(factor(DimensionTag::Temperature, si, eng), 1.0);
  for tag in DimensionTag::all() {
    assert_close(factor(*tag, si, eng) * factor(*tag, eng, si), 1.0);
    assert_eq!(factor(*tag, si, si), 1.0);
  }
}

#[test]
fn steel_to_engineering() {
  let deck = "*MATERIAL, NAME=STEEL\n*DENSITY\n7800.,\n*ELASTIC\n2.1e11, 0.3\n";
  let si = DeckParser::parse_str(deck).unwrap();
  let eng = si.converted(UnitSystem::Si, UnitSystem::Engineering).unwrap();
  let steel = eng.get("steel").unwrap();
  let PropertyRecord::Density(d) = &steel.properties[0] else { panic!("not density") };
  assert_close(d.rows[0].values[0], 7.8e-9);
  let PropertyRecord::Elastic(el) = &steel.properties[1] else { panic!("not elastic") };
  assert_close(el.rows[0].values[0], 210000.0);
  assert_eq!(el.rows[0].values[1], 0.3);
  // the source is untouched
  let PropertyRecord::Density(d) = &si.get("STEEL").unwrap().properties[0] else {
    panic!("not density")
  };
  assert_eq!(d.rows[0].values[0], 7800.0);
}

#[test]
fn identity_and_invertibility() {
  let model = DeckParser::parse_str(super::SAMPLE_DECK).unwrap();
  let same = model.converted(UnitSystem::Si, UnitSystem::Si).unwrap();
  assert_eq!(same, model);
  let eng = model.converted(UnitSystem::Si, UnitSystem::Engineering).unwrap();
  assert!(!eng.approx_eq(&model, 1e-9));
  let back = eng.converted(UnitSystem::Engineering, UnitSystem::Si).unwrap();
  assert!(back.approx_eq(&model, 1e-12));
}

#[test]
fn modifiers_get_converted() {
  let deck = "\
*MATERIAL, NAME=M
*PLASTIC, RATE=0.5
100.e6, 0.
*EXPANSION, ZERO=20.
1.2e-5
*DAMPING, BETA=2.e-4
";
  let model = DeckParser::parse_str(deck).unwrap();
  let eng = model.converted(UnitSystem::Si, UnitSystem::Engineering).unwrap();
  let props = &eng.get("M").unwrap().properties;
  let PropertyRecord::Plastic(pl) = &props[0] else { panic!("not plastic") };
  let PlasticTable::RateGroups { groups } = &pl.table else { panic!("not grouped") };
  assert_close(groups[0].points[0].values[0], 100.0);
  assert_eq!(groups[0].rate, 0.5);
  // strain rates, temperatures and times don't change between these systems
  assert_eq!(props[0].modifiers().get("RATE"), Some("0.5"));
  assert_eq!(props[1].modifiers().get("ZERO"), Some("20."));
  assert_eq!(props[2].modifiers().get("BETA"), Some("2.e-4"));
}

#[test]
fn unknown_dimensions() {
  let deck = "*MATERIAL, NAME=UMAT\n*USER MATERIAL, CONSTANTS=2\n2.1e11, 0.3\n";
  let model = DeckParser::parse_str(deck).unwrap();
  match model.converted(UnitSystem::Si, UnitSystem::Engineering) {
    Err(InpError::UnknownDimension { line, material, keyword, column }) => {
      assert_eq!(line, Some(1));
      assert_eq!(material, "UMAT");
      assert_eq!(keyword, "USER MATERIAL");
      assert_eq!(column, "PROPS1");
    },
    other => panic!("expected an unknown dimension, got {:?}", other),
  }
  // converting to the same system never looks anything up
  assert!(model.converted(UnitSystem::Si, UnitSystem::Si).is_ok());
  let deck = "*MATERIAL, NAME=C\n*CREEP\n1.e-20, 3., 0.\n";
  let err = DeckParser::parse_str(deck)
    .unwrap()
    .converted(UnitSystem::Engineering, UnitSystem::Si)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::UnknownDimension);
  assert_eq!(err.to_string(), "line 1: no known dimension for column FIELD1 of *CREEP in material C");
}
