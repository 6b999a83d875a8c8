use anyhow::{Context, Result};
use nnde_core::{TrainingSettings, UpdateRule};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Run configuration as read from a JSON file or the command line.
/// Omitted fields fall back to the next layer.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub problem: Option<String>,
    pub ntrain: Option<usize>,
    pub eta: Option<f64>,
    pub max_epochs: Option<usize>,
    pub hidden_units: Option<usize>,
    pub seed: Option<u64>,
    pub update_rule: Option<UpdateRule>,
}

pub const DEFAULT_PROBLEM: &str = "ode00";
pub const DEFAULT_NTRAIN: usize = 10;

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            problem: other.problem.or(self.problem),
            ntrain: other.ntrain.or(self.ntrain),
            eta: other.eta.or(self.eta),
            max_epochs: other.max_epochs.or(self.max_epochs),
            hidden_units: other.hidden_units.or(self.hidden_units),
            seed: other.seed.or(self.seed),
            update_rule: other.update_rule.or(self.update_rule),
        }
    }

    pub fn problem_name(&self) -> &str {
        self.problem.as_deref().unwrap_or(DEFAULT_PROBLEM)
    }

    pub fn ntrain(&self) -> usize {
        self.ntrain.unwrap_or(DEFAULT_NTRAIN)
    }

    pub fn settings(&self) -> TrainingSettings {
        let defaults = TrainingSettings::default();
        TrainingSettings {
            eta: self.eta.unwrap_or(defaults.eta),
            max_epochs: self.max_epochs.unwrap_or(defaults.max_epochs),
            hidden_units: self.hidden_units.unwrap_or(defaults.hidden_units),
            seed: self.seed.unwrap_or(defaults.seed),
            update_rule: self.update_rule.unwrap_or(defaults.update_rule),
        }
    }
}
