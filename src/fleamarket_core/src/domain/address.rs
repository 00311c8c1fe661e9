use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation_error::ValidationError;

/// Separator of the single-string address form: `"<postal> <prefecture> <city> <detail>"`.
pub const ADDRESS_DELIMITER: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    postal_code: String,
    prefecture: String,
    city: String,
    #[serde(rename = "address_detail")]
    detail: String,
}

impl Address {
    pub fn new(
        postal_code: impl Into<String>,
        prefecture: impl Into<String>,
        city: impl Into<String>,
        detail: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            postal_code: postal_code.into(),
            prefecture: prefecture.into(),
            city: city.into(),
            detail: detail.into(),
        };

        let parts = address.parts();
        let well_formed = parts
            .iter()
            .all(|part| !part.is_empty() && !part.contains(ADDRESS_DELIMITER));
        if !well_formed {
            return Err(ValidationError::MalformedAddress {
                parts: parts.iter().filter(|part| !part.is_empty()).count(),
            });
        }

        Ok(address)
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn prefecture(&self) -> &str {
        &self.prefecture
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    fn parts(&self) -> [&str; 4] {
        [&self.postal_code, &self.prefecture, &self.city, &self.detail]
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(ADDRESS_DELIMITER).collect();
        let [postal_code, prefecture, city, detail] = parts.as_slice() else {
            return Err(ValidationError::MalformedAddress { parts: parts.len() });
        };
        Self::new(*postal_code, *prefecture, *city, *detail)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [postal_code, prefecture, city, detail] = self.parts();
        write!(
            f,
            "{postal_code}{ADDRESS_DELIMITER}{prefecture}{ADDRESS_DELIMITER}{city}{ADDRESS_DELIMITER}{detail}"
        )
    }
}
