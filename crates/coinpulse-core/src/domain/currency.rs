use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Display currencies supported by the market views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    #[default]
    Brl,
}

impl Currency {
    /// Lowercase code used in upstream query parameters and payload maps.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Brl => "brl",
        }
    }

    pub const fn all() -> [Self; 2] {
        [Self::Usd, Self::Brl]
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "brl" => Ok(Self::Brl),
            _ => Err(ValidationError::InvalidCurrency {
                value: value.to_owned(),
            }),
        }
    }
}
