use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Market regime steering the second-stage perturbation of each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Flat,
    Bull,
    Bear,
    Volatile,
}

impl Trend {
    pub const ALL: [Trend; 4] = [Trend::Flat, Trend::Bull, Trend::Bear, Trend::Volatile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Flat => "flat",
            Trend::Bull => "bull",
            Trend::Bear => "bear",
            Trend::Volatile => "volatile",
        }
    }

    /// Next regime in selector order, wrapping back to `Flat`.
    pub fn next(self) -> Self {
        match self {
            Trend::Flat => Trend::Bull,
            Trend::Bull => Trend::Bear,
            Trend::Bear => Trend::Volatile,
            Trend::Volatile => Trend::Flat,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Trend::Flat),
            "bull" => Ok(Trend::Bull),
            "bear" => Ok(Trend::Bear),
            "volatile" => Ok(Trend::Volatile),
            other => Err(format!(
                "unknown trend '{}', expected one of flat/bull/bear/volatile",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Bull".parse::<Trend>().unwrap(), Trend::Bull);
        assert_eq!(" VOLATILE ".parse::<Trend>().unwrap(), Trend::Volatile);
        assert!("sideways".parse::<Trend>().is_err());
    }

    #[test]
    fn next_cycles_through_every_regime() {
        let mut t = Trend::Flat;
        for expected in [Trend::Bull, Trend::Bear, Trend::Volatile, Trend::Flat] {
            t = t.next();
            assert_eq!(t, expected);
        }
    }
}
