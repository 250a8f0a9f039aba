//! This module implements the list of known cards: the keywords that signal
//! them, and which classifier turns their blocks into property records.

use std::fmt::Display;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::blocks::RawBlock;
use crate::cards::*;
use crate::errors::InpError;

/// Generates the CardType enum and dispatches to the classifiers.
macro_rules! gen_card_types {
  (
    $(
      {
        $desc:literal,
        $cname:ident,
        [$($kw:literal),*],
        $classify:path
      },
    )*
  ) => {
    /// All the known card types. `Unparsed` stands for any other keyword.
    #[derive(
      Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd,
      Ord, Hash
    )]
    #[non_exhaustive]
    pub enum CardType {
      $(
        #[doc = $desc]
        $cname,
      )*
    }

    impl CardType {
      /// Returns all known card types.
      pub const fn all() -> &'static [Self] {
        return &[ $(Self::$cname,)* ];
      }

      /// Returns the description of the card.
      pub const fn desc(&self) -> &'static str {
        return match self {
          $(Self::$cname => $desc,)*
        };
      }

      /// Returns the normalized keywords that signal this card.
      pub const fn keywords(&self) -> &'static [&'static str] {
        return match self {
          $(Self::$cname => &[$($kw),*],)*
        };
      }

      /// Returns the small name of the variant, CamelCase.
      pub const fn short_name(&self) -> &'static str {
        return match self {
          $(Self::$cname => stringify!($cname),)*
        };
      }

      /// Runs the classifier for this card type.
      pub fn classify(
        &self,
        block: &RawBlock
      ) -> Result<PropertyRecord, InpError> {
        return match self {
          $(Self::$cname => $classify(block),)*
        };
      }
    }
  };
}

gen_card_types!(
  {
    "Linear elasticity",
    Elastic,
    ["ELASTIC"],
    elastic::classify
  },
  {
    "Metal plasticity",
    Plastic,
    ["PLASTIC"],
    plastic::classify
  },
  {
    "Mass density",
    Density,
    ["DENSITY"],
    thermal::classify_density
  },
  {
    "Thermal conductivity",
    Conductivity,
    ["CONDUCTIVITY"],
    thermal::classify_conductivity
  },
  {
    "Specific heat",
    SpecificHeat,
    ["SPECIFIC HEAT"],
    thermal::classify_specific_heat
  },
  {
    "Thermal expansion",
    Expansion,
    ["EXPANSION"],
    thermal::classify_expansion
  },
  {
    "Material damping",
    Damping,
    ["DAMPING"],
    damping::classify_damping
  },
  {
    "Hyperelasticity",
    Hyperelastic,
    ["HYPERELASTIC"],
    hyperelastic::classify
  },
  {
    "Viscoelasticity",
    Viscoelastic,
    ["VISCOELASTIC"],
    viscoelastic::classify
  },
  {
    "Power-law rate dependence",
    RateDependent,
    ["RATE DEPENDENT"],
    damping::classify_rate_dependent
  },
  {
    "User material constants",
    UserMaterial,
    ["USER MATERIAL"],
    user::classify_user_material
  },
  {
    "Solution-dependent state variables",
    Depvar,
    ["DEPVAR"],
    user::classify_depvar
  },
  {
    "Damage initiation criterion",
    DamageInitiation,
    ["DAMAGE INITIATION"],
    damage::classify_initiation
  },
  {
    "Damage evolution law",
    DamageEvolution,
    ["DAMAGE EVOLUTION"],
    damage::classify_evolution
  },
  {
    "Unrecognized keyword",
    Unparsed,
    [],
    unparsed::classify
  },
);

impl CardType {
  /// Finds the card type for a normalized keyword. Unknown keywords are
  /// `Unparsed`.
  pub fn from_keyword(keyword: &str) -> Self {
    return Self::all()
      .iter()
      .copied()
      .find(|ct| ct.keywords().contains(&keyword))
      .unwrap_or(Self::Unparsed);
  }

  /// Returns the main keyword for this card (empty for `Unparsed`).
  pub fn keyword(&self) -> &'static str {
    return self.keywords().first().copied().unwrap_or("");
  }

  /// Returns the small, snake case name of the variant.
  pub fn snake_case_name(&self) -> String {
    return self.short_name().to_case(Case::Snake);
  }
}

impl Display for CardType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.desc());
  }
}
