//! Pet record written by the publish view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Status a freshly published pet gets unless the form says otherwise
pub const DEFAULT_ESTADO: &str = "publicado";

/// Species a pet can be listed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Dog
    Perro,
    /// Cat
    #[default]
    Gato,
}

impl Species {
    /// Every selectable species, in display order
    pub const ALL: [Species; 2] = [Species::Perro, Species::Gato];

    /// Stored value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Perro => "perro",
            Self::Gato => "gato",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A species string that is neither `perro` nor `gato`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown species {0:?}, expected one of: perro, gato")]
pub struct ParseSpeciesError(pub String);

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perro" => Ok(Self::Perro),
            "gato" => Ok(Self::Gato),
            other => Err(ParseSpeciesError(other.to_string())),
        }
    }
}

/// Row inserted into the pets table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    /// Id of the signed-in user publishing the pet
    pub owner_id: Uuid,
    /// Display name
    pub nombre: String,
    /// Species
    pub especie: Species,
    /// Listing status
    pub estado: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_species_is_gato() {
        assert_eq!(Species::default(), Species::Gato);
    }

    #[test]
    fn test_species_parse() {
        assert_eq!("perro".parse::<Species>(), Ok(Species::Perro));
        assert_eq!("gato".parse::<Species>(), Ok(Species::Gato));
        assert!("Perro".parse::<Species>().is_err());
        assert!("loro".parse::<Species>().is_err());
    }

    #[test]
    fn test_selectable_values_are_exactly_perro_and_gato() {
        let values: Vec<&str> = Species::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(values, ["perro", "gato"]);
    }

    #[test]
    fn test_new_pet_json_shape() {
        let owner_id = Uuid::new_v4();
        let pet = NewPet {
            owner_id,
            nombre: "Rex".into(),
            especie: Species::Perro,
            estado: DEFAULT_ESTADO.into(),
        };

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "owner_id": owner_id.to_string(),
                "nombre": "Rex",
                "especie": "perro",
                "estado": "publicado",
            })
        );
    }

    proptest! {
        #[test]
        fn only_perro_and_gato_parse(s in "\\PC*") {
            let parsed = s.parse::<Species>();
            prop_assert_eq!(parsed.is_ok(), s == "perro" || s == "gato");
        }

        #[test]
        fn display_round_trips(idx in 0usize..2) {
            let species = Species::ALL[idx];
            prop_assert_eq!(species.to_string().parse::<Species>(), Ok(species));
        }
    }
}
