//! Reactor Type - Closed enum for `reactor_type_code`
//!
//! Accepts an integer code (1-4) or a design acronym. Anything else falls
//! back to the baseline `Pwr`, which is also the category that emits no
//! indicator column.

use serde::{Deserialize, Serialize};

use super::record::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactorType {
    /// Pressurized water reactor (code 1, baseline)
    #[default]
    Pwr,
    /// Boiling water reactor (code 2)
    Bwr,
    /// Pressurized heavy water reactor (code 3)
    Phwr,
    /// Gas-cooled reactor (code 4)
    Gcr,
}

impl ReactorType {
    pub const ALL: [ReactorType; 4] = [
        ReactorType::Pwr,
        ReactorType::Bwr,
        ReactorType::Phwr,
        ReactorType::Gcr,
    ];

    pub fn code(self) -> u8 {
        match self {
            ReactorType::Pwr => 1,
            ReactorType::Bwr => 2,
            ReactorType::Phwr => 3,
            ReactorType::Gcr => 4,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| i64::from(t.code()) == code)
    }

    /// Exact, case-sensitive acronym match
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PWR" => Some(ReactorType::Pwr),
            "BWR" => Some(ReactorType::Bwr),
            "PHWR" => Some(ReactorType::Phwr),
            "GCR" => Some(ReactorType::Gcr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReactorType::Pwr => "PWR",
            ReactorType::Bwr => "BWR",
            ReactorType::Phwr => "PHWR",
            ReactorType::Gcr => "GCR",
        }
    }

    /// Baseline category; its indicator column is implicit
    pub fn is_baseline(self) -> bool {
        self == ReactorType::Pwr
    }

    /// Parse a supplied scalar, falling back to the baseline
    pub fn from_scalar(value: &Scalar) -> Self {
        let parsed = match value {
            Scalar::Number(n) if n.fract() == 0.0 => Self::from_code(*n as i64),
            Scalar::Text(s) => Self::from_name(s),
            _ => None,
        };

        parsed.unwrap_or_else(|| {
            log::debug!("Unrecognized reactor_type_code {}, using baseline PWR", value);
            ReactorType::default()
        })
    }
}

impl std::fmt::Display for ReactorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for t in ReactorType::ALL {
            assert_eq!(ReactorType::from_code(i64::from(t.code())), Some(t));
            assert_eq!(ReactorType::from_name(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_from_scalar_numbers() {
        assert_eq!(ReactorType::from_scalar(&Scalar::Number(2.0)), ReactorType::Bwr);
        assert_eq!(ReactorType::from_scalar(&Scalar::Number(4.0)), ReactorType::Gcr);
        assert_eq!(ReactorType::from_scalar(&Scalar::Number(2.5)), ReactorType::Pwr);
        assert_eq!(ReactorType::from_scalar(&Scalar::Number(9.0)), ReactorType::Pwr);
    }

    #[test]
    fn test_from_scalar_names() {
        assert_eq!(ReactorType::from_scalar(&"PHWR".into()), ReactorType::Phwr);
        assert_eq!(ReactorType::from_scalar(&"bwr".into()), ReactorType::Pwr);
        assert_eq!(ReactorType::from_scalar(&"RBMK".into()), ReactorType::Pwr);
        assert_eq!(ReactorType::from_scalar(&"3".into()), ReactorType::Pwr);
    }

    #[test]
    fn test_from_scalar_other() {
        assert_eq!(ReactorType::from_scalar(&Scalar::Bool(true)), ReactorType::Pwr);
        assert!(ReactorType::default().is_baseline());
    }
}
