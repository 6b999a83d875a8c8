use crate::error::{NndeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a parameter moves once its error derivatives are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// `p - η·(dE/dp)/(d²E/dp²)`
    #[default]
    DiagonalNewton,
    /// `p - η·dE/dp`
    GradientDescent,
}

impl fmt::Display for UpdateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateRule::DiagonalNewton => write!(f, "newton"),
            UpdateRule::GradientDescent => write!(f, "gradient"),
        }
    }
}

impl FromStr for UpdateRule {
    type Err = NndeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "newton" | "diagonal_newton" => Ok(UpdateRule::DiagonalNewton),
            "gradient" | "gd" | "gradient_descent" => Ok(UpdateRule::GradientDescent),
            other => Err(NndeError::InvalidSettings(format!(
                "unknown update rule '{}' (expected 'newton' or 'gradient')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    /// Learning rate.
    pub eta: f64,
    pub max_epochs: usize,
    pub hidden_units: usize,
    /// Seed for the parameter initialisation.
    pub seed: u64,
    pub update_rule: UpdateRule,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            eta: 0.01,
            max_epochs: 1000,
            hidden_units: 10,
            seed: 0,
            update_rule: UpdateRule::DiagonalNewton,
        }
    }
}

impl TrainingSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.eta.is_finite() || self.eta <= 0.0 {
            return Err(NndeError::InvalidSettings(format!(
                "eta must be positive and finite, got {}",
                self.eta
            )));
        }
        if self.max_epochs == 0 {
            return Err(NndeError::InvalidSettings(
                "max_epochs must be greater than zero".into(),
            ));
        }
        if self.hidden_units == 0 {
            return Err(NndeError::InvalidSettings(
                "hidden_units must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = TrainingSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.update_rule, UpdateRule::DiagonalNewton);
        assert_eq!(settings.max_epochs, 1000);
    }

    #[test]
    fn rejects_degenerate_settings() {
        for settings in [
            TrainingSettings { eta: 0.0, ..Default::default() },
            TrainingSettings { eta: f64::NAN, ..Default::default() },
            TrainingSettings { eta: -0.1, ..Default::default() },
            TrainingSettings { max_epochs: 0, ..Default::default() },
            TrainingSettings { hidden_units: 0, ..Default::default() },
        ] {
            assert!(matches!(
                settings.validate(),
                Err(NndeError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn update_rule_names() {
        assert_eq!("newton".parse::<UpdateRule>().unwrap(), UpdateRule::DiagonalNewton);
        assert_eq!("gd".parse::<UpdateRule>().unwrap(), UpdateRule::GradientDescent);
        assert!("adam".parse::<UpdateRule>().is_err());
        assert_eq!(UpdateRule::GradientDescent.to_string(), "gradient");
    }
}
