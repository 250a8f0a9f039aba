mod blocks;
mod cards;
mod parser;
mod units;

use crate::util::{decode_inpfloat, fmt_inpfloat};

/// A small deck touching most of the cards.
pub(crate) const SAMPLE_DECK: &str = "\
*HEADING
sample deck
** materials follow
*Material, name=Steel
*Density
7800.,
*Elastic
2.1e11, 0.3, 20.
2.0e11, 0.3, 200.
*Plastic
250.e6, 0.
300.e6, 0.1
*Expansion, zero=20.
1.2e-5
*Damping, alpha=0.5, beta=1.e-4
*MATERIAL, NAME=\"Rubber A\"
*HYPERELASTIC, MOONEY-RIVLIN
0.5e6, 0.1e6, 1.e-9
*VISCOELASTIC, TIME=PRONY
0.3, 0., 0.1
0.2, 0., 1.
*SOLID SECTION, ELSET=ALL, MATERIAL=Steel
1.
*STEP
*STATIC
";

#[test]
fn test_decode_inpfloat() {
  let epsilon = 1e-6_f64;
  let assert_near = |a: f64, b: f64| assert!((a - b).abs() < epsilon);
  let direct = |s: &str, f: f64| assert_near(decode_inpfloat(s).unwrap(), f);
  let parsed = |s: &str| direct(s, s.parse().unwrap());
  let must_fail = |s: &str| assert_eq!(decode_inpfloat(s), None);
  // possible signs
  let signs = ["", "+", "-"];
  // possible exponent letters, fortran ones included
  let seps = ["e", "E", "d", "D"];
  // some mantissas
  let mantissas = ["0", "1", "0.25", ".25", "3.1415", "7800."];
  // some exponents
  let exponents = ["0", "1", "2", "3", "10"];
  for msign in signs.iter() {
    for m in mantissas.iter() {
      parsed(&format!("{}{}", msign, m));
      for sep in seps.iter() {
        for e in exponents.iter() {
          for esign in signs.iter() {
            let nf = format!("{}{}{}{}{}", msign, m, sep, esign, e);
            let rf = format!("{}{}e{}{}", msign, m, esign, e);
            direct(&nf, rf.parse().unwrap());
          }
        }
      }
    }
  }
  direct("  7800. ", 7800.0);
  must_fail("");
  must_fail("   ");
  must_fail("+");
  must_fail("-");
  must_fail("e");
  must_fail("D");
  must_fail(".");
  must_fail("..");
  must_fail(".e");
  must_fail("inf");
  must_fail("NaN");
  must_fail("STEEL");
  must_fail("1.0.0");
}

#[test]
fn test_fmt_inpfloat() {
  assert_eq!(fmt_inpfloat(7800.0), "7800.");
  assert_eq!(fmt_inpfloat(0.3), "0.3");
  assert_eq!(fmt_inpfloat(0.0), "0.");
  assert_eq!(fmt_inpfloat(-2.5), "-2.5");
  assert_eq!(fmt_inpfloat(2.1e11), "2.1e11");
  assert_eq!(fmt_inpfloat(7.8e-9), "7.8e-9");
  // whatever comes out must come back in unchanged
  for x in [1.0 / 3.0, 2.0e11 / 7.0, -1.0e-7 / 3.0, 123456.789, 1e300] {
    assert_eq!(decode_inpfloat(&fmt_inpfloat(x)), Some(x));
  }
}
