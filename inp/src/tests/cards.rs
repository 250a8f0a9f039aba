use crate::cards::*;
use crate::errors::{ErrorKind, InpError};
use crate::parser::DeckParser;

/// Parses a single property written under a material called M.
fn parse_one(body: &str) -> Result<PropertyRecord, InpError> {
  let deck = format!("*MATERIAL, NAME=M\n{}", body);
  let model = DeckParser::parse_str(&deck)?;
  return Ok(model.get("M").unwrap().properties[0].clone());
}

/// Parses a single property, expecting an error of some kind.
fn parse_err(body: &str) -> ErrorKind {
  return parse_one(body).unwrap_err().kind();
}

#[test]
fn card_types() {
  assert_eq!(CardType::from_keyword("SPECIFIC HEAT"), CardType::SpecificHeat);
  assert_eq!(CardType::from_keyword("USER DEFINED FIELD"), CardType::Unparsed);
  assert_eq!(CardType::DamageEvolution.keyword(), "DAMAGE EVOLUTION");
  assert_eq!(CardType::RateDependent.snake_case_name(), "rate_dependent");
  for ct in CardType::all() {
    if *ct != CardType::Unparsed {
      assert_eq!(CardType::from_keyword(ct.keyword()), *ct);
    }
  }
}

#[test]
fn elastic_isotropic() {
  let rec = parse_one("*ELASTIC\n2.1e11, 0.3, 20.\n2.0e11, 0.3, 200.\n").unwrap();
  let PropertyRecord::Elastic(el) = rec else { panic!("not elastic") };
  assert_eq!(el.kind, ElasticType::Isotropic);
  assert_eq!(el.rows.len(), 2);
  assert_eq!(el.rows[0].values, vec![2.1e11, 0.3]);
  assert_eq!(el.rows[1].temperature, Some(200.0));
  assert!(el.rows[0].field_variables.is_empty());
  // one field too many without DEPENDENCIES
  assert_eq!(
    parse_err("*ELASTIC\n2.1e11, 0.3, 20., 1.\n"),
    ErrorKind::RowArityMismatch
  );
  assert_eq!(parse_err("*ELASTIC\n2.1e11\n"), ErrorKind::RowArityMismatch);
  assert_eq!(parse_err("*ELASTIC\n"), ErrorKind::RowArityMismatch);
}

#[test]
fn elastic_dependencies() {
  let rec = parse_one(
    "*ELASTIC, DEPENDENCIES=2\n2.1e11, 0.3, 20., 1., 2.\n2.1e11, 0.3\n"
  ).unwrap();
  let PropertyRecord::Elastic(el) = rec else { panic!("not elastic") };
  assert_eq!(el.rows[0].field_variables, vec![1.0, 2.0]);
  assert_eq!(el.rows[1].temperature, None);
  assert_eq!(
    el.flat_rows()[0].iter().map(|(c, _)| c.as_str()).collect::<Vec<_>>(),
    vec!["E", "NU", "TEMP", "FV1", "FV2"]
  );
}

#[test]
fn elastic_orthotropic() {
  let head = "*ELASTIC, TYPE=ORTHOTROPIC\n";
  let nine = "1., 2., 3., 4., 5., 6., 7., 8., 9.\n";
  let rec = parse_one(&format!("{}{}", head, nine)).unwrap();
  assert_eq!(rec.columns().len(), 9);
  // temperature on a continuation line
  let cont = "1., 2., 3., 4., 5., 6., 7., 8.,\n9., 20.\n";
  let PropertyRecord::Elastic(el) = parse_one(&format!("{}{}", head, cont)).unwrap()
    else { panic!("not elastic") };
  assert_eq!(el.rows[0].values.len(), 9);
  assert_eq!(el.rows[0].temperature, Some(20.0));
  // 8 and 10 fields on one line
  let eight = "1., 2., 3., 4., 5., 6., 7., 8.\n";
  let ten = "1., 2., 3., 4., 5., 6., 7., 8., 9., 20.\n";
  for bad in [eight, ten] {
    match parse_one(&format!("{}{}", head, bad)) {
      Err(InpError::RowArityMismatch { line, material, .. }) => {
        assert_eq!(line, 3);
        assert_eq!(material.as_deref(), Some("M"));
      },
      other => panic!("expected an arity error, got {:?}", other),
    }
  }
}

#[test]
fn elastic_anisotropic() {
  let rows = "1.,2.,3.,4.,5.,6.,7.,8.,\n9.,10.,11.,12.,13.,14.,15.,16.,\n17.,18.,19.,20.,21.\n";
  let rec = parse_one(&format!("*ELASTIC, TYPE=ANISOTROPIC\n{}", rows)).unwrap();
  let PropertyRecord::Elastic(el) = rec else { panic!("not elastic") };
  assert_eq!(el.kind, ElasticType::Anisotropic);
  assert_eq!(el.rows[0].values.len(), 21);
  assert_eq!(el.rows[0].values[20], 21.0);
  assert_eq!(
    parse_err("*ELASTIC, TYPE=TRACTION\n1., 2., 3.\n"),
    ErrorKind::UnsupportedCardVariant
  );
}

#[test]
fn elastic_lamina() {
  let rec = parse_one("*ELASTIC, TYPE=LAMINA\n1., 2., 3., 4., 5., 6., 20.\n").unwrap();
  let PropertyRecord::Elastic(el) = rec else { panic!("not elastic") };
  assert_eq!(el.kind, ElasticType::Lamina);
  assert_eq!(el.rows[0].values.len(), 6);
  assert_eq!(el.rows[0].temperature, Some(20.0));
  assert_eq!(
    parse_err("*ELASTIC, TYPE=LAMINA\n1., 2., 3., 4., 5.\n"),
    ErrorKind::RowArityMismatch
  );
}

#[test]
fn field_decoding() {
  let PropertyRecord::Elastic(el) = parse_one("*ELASTIC\n2.1D11, , 20.\n").unwrap()
    else { panic!("not elastic") };
  assert_eq!(el.rows[0].values, vec![2.1e11, 0.0]);
  assert_eq!(el.rows[0].temperature, Some(20.0));
  match parse_one("*DENSITY\nabc\n") {
    Err(InpError::InvalidNumber { text, material, keyword, line }) => {
      assert_eq!(text, "abc");
      assert_eq!(material.as_deref(), Some("M"));
      assert_eq!(keyword, "DENSITY");
      assert_eq!(line, 3);
    },
    other => panic!("expected an invalid number, got {:?}", other),
  }
}

#[test]
fn plastic_tabular() {
  let rec = parse_one("*PLASTIC\n250.e6, 0.\n300.e6, 0.1, 20.\n").unwrap();
  let PropertyRecord::Plastic(pl) = rec else { panic!("not plastic") };
  assert_eq!(pl.hardening, Hardening::Isotropic);
  let PlasticTable::Tabular { rows } = &pl.table else { panic!("not tabular") };
  assert_eq!(rows[1].values, vec![300.0e6, 0.1]);
  assert_eq!(rows[1].temperature, Some(20.0));
  let rec = parse_one("*PLASTIC, HARDENING=KINEMATIC\n250.e6, 0.\n").unwrap();
  assert_eq!(rec.columns(), vec!["STRESS", "BACK STRESS"]);
  let rec = parse_one(
    "*PLASTIC, HARDENING=JOHNSON COOK\n350.e6, 275.e6, 0.36, 1., 1800., 293.\n"
  ).unwrap();
  assert_eq!(rec.columns().len(), 6);
  assert_eq!(
    parse_err("*PLASTIC, HARDENING=JOHNSON COOK\n350.e6, 275.e6, 0.36, 1., 1800., 293., 20.\n"),
    ErrorKind::RowArityMismatch
  );
  assert_eq!(
    parse_err("*PLASTIC, HARDENING=USER\n1., 2.\n"),
    ErrorKind::UnsupportedCardVariant
  );
}

#[test]
fn plastic_layout_modifiers() {
  let rec = parse_one(
    "*PLASTIC, HARDENING=COMBINED, DATATYPE=HALF CYCLE\n250.e6, 0.\n"
  ).unwrap();
  assert_eq!(rec.columns(), vec!["YIELD STRESS", "PLASTIC STRAIN"]);
  for bad in [
    "*PLASTIC, HARDENING=COMBINED, DATATYPE=PARAMETERS, NUMBER BACKSTRESSES=1\n250.e6, 20.e9, 100.\n",
    "*PLASTIC, HARDENING=COMBINED, DATATYPE=STABILIZED\n250.e6, 0.\n",
    "*PLASTIC, SCALE STRESS=1.e6\n250., 0.\n",
  ] {
    assert_eq!(parse_err(bad), ErrorKind::UnsupportedCardVariant);
  }
}

#[test]
fn plastic_rate_groups() {
  let rec = parse_one(
    "*PLASTIC, RATE\n100., 0.0, 10.0\n150., 0.05\n300., 0.0, 100.0\n400., 0.05\n"
  ).unwrap();
  let PropertyRecord::Plastic(pl) = rec else { panic!("not plastic") };
  let PlasticTable::RateGroups { groups } = &pl.table else {
    panic!("not grouped")
  };
  assert_eq!(groups.len(), 2);
  assert_eq!(groups[0].rate, 10.0);
  assert_eq!(groups[0].points, vec![
    DataRow::plain(vec![100.0, 0.0]),
    DataRow::plain(vec![150.0, 0.05]),
  ]);
  assert_eq!(groups[1].rate, 100.0);
  assert_eq!(groups[1].points, vec![
    DataRow::plain(vec![300.0, 0.0]),
    DataRow::plain(vec![400.0, 0.05]),
  ]);
  // the rate only shows up once per group on the deck
  let widths = pl.deck_rows().iter().map(|r| r.len()).collect::<Vec<_>>();
  assert_eq!(widths, vec![3, 2, 3, 2]);
  // every flat row carries it
  assert!(pl.flat_rows().iter().all(|r| r.len() == 3));
}

#[test]
fn plastic_rate_modifier() {
  let rec = parse_one("*PLASTIC, RATE=0.5\n100., 0.0\n150., 0.05\n").unwrap();
  let PropertyRecord::Plastic(pl) = rec else { panic!("not plastic") };
  let PlasticTable::RateGroups { groups } = &pl.table else {
    panic!("not grouped")
  };
  assert_eq!(groups.len(), 1);
  assert_eq!(groups[0].rate, 0.5);
  assert_eq!(groups[0].points.len(), 2);
  // no rate anywhere to open the first group
  assert_eq!(
    parse_err("*PLASTIC, RATE\n100., 0.0\n"),
    ErrorKind::RowArityMismatch
  );
  assert_eq!(
    parse_err("*PLASTIC, RATE\n100., 0.0, 1., 2.\n"),
    ErrorKind::RowArityMismatch
  );
  match parse_one("*PLASTIC, RATE=abc\n100., 0.0\n") {
    Err(InpError::InvalidNumber { text, line, .. }) => {
      assert_eq!(text, "abc");
      assert_eq!(line, 2);
    },
    other => panic!("expected an invalid number, got {:?}", other),
  }
}

#[test]
fn thermal_cards() {
  let deck = "\
*DENSITY
7800.,
*CONDUCTIVITY, TYPE=ORTHO
45., 45., 30.
*SPECIFIC HEAT
460., 20.
*EXPANSION, TYPE=ANISO, ZERO=20.
1., 2., 3., 4., 5., 6.
";
  let model = DeckParser::parse_str(&format!("*MATERIAL, NAME=M\n{}", deck)).unwrap();
  let props = &model.get("m").unwrap().properties;
  assert_eq!(props.len(), 4);
  let PropertyRecord::Density(d) = &props[0] else { panic!("not density") };
  assert_eq!(d.rows[0].values, vec![7800.0]);
  assert_eq!(props[1].columns(), vec!["K11", "K22", "K33"]);
  let PropertyRecord::SpecificHeat(cp) = &props[2] else { panic!("not cp") };
  assert_eq!(cp.rows[0].temperature, Some(20.0));
  assert_eq!(props[3].columns().len(), 6);
  assert_eq!(props[3].modifiers().get("ZERO"), Some("20."));
  assert_eq!(
    parse_err("*CONDUCTIVITY, TYPE=ORTHO\n45., 45.\n"),
    ErrorKind::RowArityMismatch
  );
}

#[test]
fn damping_and_rate_dependent() {
  let PropertyRecord::Damping(d) = parse_one("*DAMPING, ALPHA=0.5, STRUCTURAL=0.02\n").unwrap()
    else { panic!("not damping") };
  assert_eq!(d.alpha, Some(0.5));
  assert_eq!(d.beta, None);
  assert_eq!(d.structural, Some(0.02));
  assert!(d.deck_rows().is_empty());
  assert_eq!(parse_err("*DAMPING\n"), ErrorKind::UnsupportedCardVariant);
  assert_eq!(parse_err("*DAMPING, ALPHA=0.5\n1.\n"), ErrorKind::RowArityMismatch);
  let rec = parse_one("*RATE DEPENDENT, TYPE=POWER LAW, MULTIPLIER=40.4, EXPONENT=5.\n")
    .unwrap();
  let PropertyRecord::RateDependent(rd) = rec else { panic!("not rate dependent") };
  assert_eq!(rd.multiplier, 40.4);
  assert_eq!(rd.exponent, 5.0);
  assert_eq!(
    parse_err("*RATE DEPENDENT, MULTIPLIER=40.4, EXPONENT=5.\n40.4, 5.\n"),
    ErrorKind::RowArityMismatch
  );
  assert_eq!(
    parse_err("*RATE DEPENDENT, MULTIPLIER=40.4\n"),
    ErrorKind::UnsupportedCardVariant
  );
  assert_eq!(
    parse_err("*RATE DEPENDENT, TYPE=JOHNSON COOK, MULTIPLIER=1., EXPONENT=1.\n"),
    ErrorKind::UnsupportedCardVariant
  );
}

#[test]
fn hyperelastic_models() {
  let model_of = |body: &str| match parse_one(body).unwrap() {
    PropertyRecord::Hyperelastic(h) => h,
    _ => panic!("not hyperelastic"),
  };
  let h = model_of("*HYPERELASTIC, MOONEY-RIVLIN\n0.5e6, 0.1e6, 1.e-9\n");
  assert_eq!(h.model, HyperelasticModel::MooneyRivlin);
  assert_eq!(h.rows[0].values.len(), 3);
  let h = model_of("*HYPERELASTIC, Neo Hooke\n0.5e6, 1.e-9, 20.\n");
  assert_eq!(h.model, HyperelasticModel::NeoHooke);
  assert_eq!(h.rows[0].temperature, Some(20.0));
  let h = model_of("*HYPERELASTIC, OGDEN, N=2\n1., 2., 3., 4., 0.1, 0.2\n");
  assert_eq!(h.model, HyperelasticModel::Ogden { order: 2 });
  assert_eq!(
    h.model.columns(),
    vec!["MU1", "ALPHA1", "MU2", "ALPHA2", "D1", "D2"]
  );
  let h = model_of("*HYPERELASTIC, REDUCED POLYNOMIAL, N=3\n1., 2., 3., 4., 5., 6.\n");
  assert_eq!(h.columns(), vec!["C10", "C20", "C30", "D1", "D2", "D3"]);
  // no flag is a first order polynomial
  let h = model_of("*HYPERELASTIC\n1., 2., 3.\n");
  assert_eq!(h.model, HyperelasticModel::Polynomial { order: 1 });
  assert_eq!(h.columns(), vec!["C10", "C01", "D1"]);
  assert_eq!(
    HyperelasticModel::Polynomial { order: 2 }.columns(),
    vec!["C10", "C01", "C20", "C11", "C02", "D1", "D2"]
  );
  assert_eq!(
    parse_err("*HYPERELASTIC, OGDEN, N=2\n1., 2., 3.\n"),
    ErrorKind::RowArityMismatch
  );
  for bad in [
    "*HYPERELASTIC, MARLOW\n1.\n",
    "*HYPERELASTIC, USER, TYPE=COMPRESSIBLE, PROPERTIES=3\n1., 2., 3.\n",
    "*HYPERELASTIC, HOLZAPFEL\n1., 2., 3.\n",
    "*HYPERELASTIC, ANISOTROPIC\n1., 2., 3.\n",
    "*HYPERELASTIC, NEO HOOKE, YEOH\n1., 2.\n",
    "*HYPERELASTIC, OGDEN, N=7\n1.\n",
    "*HYPERELASTIC, OGDEN, N=0\n1.\n",
  ] {
    assert_eq!(parse_err(bad), ErrorKind::UnsupportedCardVariant);
  }
}

#[test]
fn hyperelastic_layouts() {
  let cases = [
    ("YEOH", 6, HyperelasticModel::Yeoh),
    ("ARRUDA-BOYCE", 3, HyperelasticModel::ArrudaBoyce),
    ("VAN DER WAALS", 5, HyperelasticModel::VanDerWaals),
    ("POLYNOMIAL, N=2", 7, HyperelasticModel::Polynomial { order: 2 }),
  ];
  for (flags, width, model) in cases {
    let head = format!("*HYPERELASTIC, {}\n", flags);
    let row = (1..=width).map(|i| format!("{}.", i)).collect::<Vec<_>>();
    let rec = parse_one(&format!("{}{}, 20.\n", head, row.join(", "))).unwrap();
    let PropertyRecord::Hyperelastic(h) = rec else { panic!("not hyperelastic") };
    assert_eq!(h.model, model);
    assert_eq!(h.columns().len(), width);
    assert_eq!(h.rows[0].values.len(), width);
    assert_eq!(h.rows[0].temperature, Some(20.0));
    // one coefficient short
    let short = row[..width - 1].join(", ");
    assert_eq!(
      parse_err(&format!("{}{}\n", head, short)),
      ErrorKind::RowArityMismatch
    );
  }
  // flags that don't touch the layout
  let rec = parse_one("*HYPERELASTIC, NEO HOOKE, ISOTROPIC, MODULI=LONG TERM\n1., 2.\n");
  assert!(rec.is_ok());
}

#[test]
fn viscoelastic_prony() {
  let rec = parse_one("*VISCOELASTIC, TIME=PRONY\n0.3, 0., 0.1\n0.2, 0., 1.\n").unwrap();
  assert_eq!(rec.flat_rows().len(), 2);
  assert_eq!(rec.columns(), vec!["G", "K", "TAU"]);
  assert_eq!(
    parse_err("*VISCOELASTIC, TIME=PRONY\n0.3, 0., 0.1, 20.\n"),
    ErrorKind::RowArityMismatch
  );
  assert_eq!(
    parse_err("*VISCOELASTIC, TIME=CREEP TEST DATA\n1., 2.\n"),
    ErrorKind::UnsupportedCardVariant
  );
  assert_eq!(
    parse_err("*VISCOELASTIC, FREQUENCY=PRONY\n1., 2., 3.\n"),
    ErrorKind::UnsupportedCardVariant
  );
}

#[test]
fn user_material() {
  let rec = parse_one(
    "*USER MATERIAL, CONSTANTS=10\n1., 2., 3., 4., 5., 6., 7., 8.\n9., 10.\n"
  ).unwrap();
  let PropertyRecord::UserMaterial(um) = &rec else { panic!("not a umat") };
  assert_eq!(um.constants.len(), 10);
  assert_eq!(um.constants[9], 10.0);
  let widths = rec.deck_rows().iter().map(|r| r.len()).collect::<Vec<_>>();
  assert_eq!(widths, vec![8, 2]);
  assert_eq!(
    parse_err("*USER MATERIAL, CONSTANTS=3\n1., 2.\n"),
    ErrorKind::RowArityMismatch
  );
  let rec = parse_one("*USER MATERIAL\n").unwrap();
  assert!(rec.flat_rows().is_empty());
  let PropertyRecord::Depvar(dv) = parse_one("*DEPVAR\n12\n").unwrap()
    else { panic!("not depvar") };
  assert_eq!(dv.count, 12);
  assert_eq!(parse_err("*DEPVAR\n1.5\n"), ErrorKind::InvalidNumber);
  assert_eq!(parse_err("*DEPVAR\n1, 2\n"), ErrorKind::RowArityMismatch);
  assert_eq!(parse_err("*DEPVAR\n"), ErrorKind::RowArityMismatch);
}

#[test]
fn damage_cards() {
  let rec = parse_one(
    "*DAMAGE INITIATION, CRITERION=DUCTILE\n0.2, -0.33, 0.001\n0.15, 0.33, 0.001\n"
  ).unwrap();
  assert_eq!(rec.columns(), vec!["PEEQ", "TRIAXIALITY", "RATE"]);
  assert_eq!(rec.flat_rows().len(), 2);
  assert_eq!(
    parse_err("*DAMAGE INITIATION\n0.2, -0.33, 0.001\n"),
    ErrorKind::UnsupportedCardVariant
  );
  let PropertyRecord::DamageEvolution(de) = parse_one(
    "*DAMAGE EVOLUTION, TYPE=ENERGY\n12000.\n"
  ).unwrap() else { panic!("not damage evolution") };
  assert_eq!(de.kind, EvolutionType::Energy);
  assert_eq!(de.columns(), vec!["GF"]);
  let rec = parse_one("*DAMAGE EVOLUTION\n0.05\n").unwrap();
  assert_eq!(rec.columns(), vec!["U"]);
  assert_eq!(
    parse_err("*DAMAGE EVOLUTION, TYPE=DISPLACEMENT, SOFTENING=TABULAR\n0.05\n"),
    ErrorKind::UnsupportedCardVariant
  );
}

#[test]
fn unparsed_passthrough() {
  let rec = parse_one("*CREEP, LAW=TIME\n1.e-20, 3., 0.\n").unwrap();
  let PropertyRecord::Unparsed(u) = &rec else { panic!("not unparsed") };
  assert_eq!(u.keyword, "CREEP");
  assert_eq!(u.rows, vec![vec!["1.e-20", "3.", "0."]]);
  assert_eq!(rec.keyword(), "CREEP");
  assert_eq!(rec.card_type(), CardType::Unparsed);
  assert_eq!(rec.modifiers().get("LAW"), Some("TIME"));
  assert_eq!(rec.columns(), vec!["FIELD1", "FIELD2", "FIELD3"]);
}
