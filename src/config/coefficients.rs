//! Coefficient tables consumed by the valuation engine
//!
//! Both tables are closed: every level has exactly one coefficient and lookup
//! is an exhaustive match. Defaults:
//!
//! | synergy   | coeff | integration | coeff |
//! |-----------|-------|-------------|-------|
//! | standard  | 1.0   | simple      | 1.0   |
//! | good      | 1.2   | moderate    | 1.3   |
//! | excellent | 1.5   | full        | 1.5   |

use serde::{Deserialize, Serialize};

use crate::error::{MetcalfeError, Result};
use crate::models::{IntegrationLevel, SynergyLevel};

/// Per-connection synergy coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyCoefficients {
    #[serde(default = "default_standard")]
    pub standard: f64,
    #[serde(default = "default_good")]
    pub good: f64,
    #[serde(default = "default_excellent")]
    pub excellent: f64,
}

impl Default for SynergyCoefficients {
    fn default() -> Self {
        Self {
            standard: default_standard(),
            good: default_good(),
            excellent: default_excellent(),
        }
    }
}

fn default_standard() -> f64 {
    1.0
}
fn default_good() -> f64 {
    1.2
}
fn default_excellent() -> f64 {
    1.5
}

impl SynergyCoefficients {
    pub fn get(&self, level: SynergyLevel) -> f64 {
        match level {
            SynergyLevel::Standard => self.standard,
            SynergyLevel::Good => self.good,
            SynergyLevel::Excellent => self.excellent,
        }
    }
}

/// Global integration coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationCoefficients {
    #[serde(default = "default_simple")]
    pub simple: f64,
    #[serde(default = "default_moderate")]
    pub moderate: f64,
    #[serde(default = "default_full")]
    pub full: f64,
}

impl Default for IntegrationCoefficients {
    fn default() -> Self {
        Self {
            simple: default_simple(),
            moderate: default_moderate(),
            full: default_full(),
        }
    }
}

fn default_simple() -> f64 {
    1.0
}
fn default_moderate() -> f64 {
    1.3
}
fn default_full() -> f64 {
    1.5
}

impl IntegrationCoefficients {
    pub fn get(&self, level: IntegrationLevel) -> f64 {
        match level {
            IntegrationLevel::Simple => self.simple,
            IntegrationLevel::Moderate => self.moderate,
            IntegrationLevel::Full => self.full,
        }
    }
}

/// Both coefficient tables
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    #[serde(default)]
    pub synergy: SynergyCoefficients,
    #[serde(default)]
    pub integration: IntegrationCoefficients,
}

impl Coefficients {
    pub fn synergy(&self, level: SynergyLevel) -> f64 {
        self.synergy.get(level)
    }

    pub fn integration(&self, level: IntegrationLevel) -> f64 {
        self.integration.get(level)
    }

    /// Reject negative or non-finite coefficients
    pub fn validate(&self) -> Result<()> {
        for level in SynergyLevel::ALL {
            check("synergy", level.as_str(), self.synergy(level))?;
        }
        for level in IntegrationLevel::ALL {
            check("integration", level.as_str(), self.integration(level))?;
        }
        Ok(())
    }
}

fn check(table: &'static str, level: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MetcalfeError::InvalidCoefficient {
            table,
            level: level.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let c = Coefficients::default();
        assert_eq!(c.synergy(SynergyLevel::Standard), 1.0);
        assert_eq!(c.synergy(SynergyLevel::Good), 1.2);
        assert_eq!(c.synergy(SynergyLevel::Excellent), 1.5);
        assert_eq!(c.integration(IntegrationLevel::Simple), 1.0);
        assert_eq!(c.integration(IntegrationLevel::Moderate), 1.3);
        assert_eq!(c.integration(IntegrationLevel::Full), 1.5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let c: Coefficients = toml::from_str(
            r#"
[synergy]
excellent = 2.0

[integration]
full = 3.0
"#,
        )
        .unwrap();
        assert_eq!(c.synergy(SynergyLevel::Excellent), 2.0);
        assert_eq!(c.synergy(SynergyLevel::Good), 1.2);
        assert_eq!(c.integration(IntegrationLevel::Full), 3.0);
        assert_eq!(c.integration(IntegrationLevel::Moderate), 1.3);
    }

    #[test]
    fn test_validate_rejects_bad_coefficients() {
        let mut c = Coefficients::default();
        c.synergy.good = -0.5;
        assert!(matches!(
            c.validate(),
            Err(MetcalfeError::InvalidCoefficient { table: "synergy", .. })
        ));

        let mut c = Coefficients::default();
        c.integration.moderate = f64::NAN;
        assert!(matches!(
            c.validate(),
            Err(MetcalfeError::InvalidCoefficient { table: "integration", .. })
        ));
    }
}
