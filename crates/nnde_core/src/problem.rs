use crate::equation::{FirstOrderOde, SecondOrderOde, SecondOrderPde};
use crate::error::Result;
use crate::formulation::{
    FirstOrderFormulation, Formulation, PdeFormulation, SecondOrderFormulation,
};
use crate::grid::TrainingSet;
use crate::settings::TrainingSettings;
use crate::solution::{Comparison, Solution};
use crate::trainer;
use crate::trial::Evaluation;

/// A differential equation of one of the supported classes, with its
/// boundary or initial data.
pub enum Problem {
    FirstOrder(Box<dyn FirstOrderOde>),
    SecondOrder(Box<dyn SecondOrderOde>),
    Pde(Box<dyn SecondOrderPde>),
}

impl Problem {
    pub fn dimension(&self) -> usize {
        match self {
            Problem::FirstOrder(_) | Problem::SecondOrder(_) => 1,
            Problem::Pde(_) => 2,
        }
    }

    /// Highest input derivative the residual depends on.
    pub fn order(&self) -> usize {
        match self {
            Problem::FirstOrder(_) => 1,
            Problem::SecondOrder(_) | Problem::Pde(_) => 2,
        }
    }

    /// The default grid for this class with `count` points per axis.
    pub fn training_points(&self, count: usize) -> Result<TrainingSet> {
        match self {
            Problem::FirstOrder(ode) => {
                let (min, max) = ode.domain();
                TrainingSet::interval_excluding(min, max, count, ode.condition().end)
            }
            Problem::SecondOrder(_) => TrainingSet::unit_interval(count),
            Problem::Pde(_) => TrainingSet::unit_square(count),
        }
    }

    /// Validates the boundary data and settings, then trains.
    pub fn solve(&self, points: &TrainingSet, settings: &TrainingSettings) -> Result<Solution> {
        match self {
            Problem::FirstOrder(ode) => {
                trainer::train(&FirstOrderFormulation::new(ode.as_ref())?, points, settings)
            }
            Problem::SecondOrder(ode) => {
                trainer::train(&SecondOrderFormulation::new(ode.as_ref())?, points, settings)
            }
            Problem::Pde(pde) => {
                trainer::train(&PdeFormulation::new(pde.as_ref())?, points, settings)
            }
        }
    }

    pub fn analytical(&self, point: &[f64]) -> Option<Evaluation> {
        match self {
            Problem::FirstOrder(ode) => ode.analytical(point[0]),
            Problem::SecondOrder(ode) => ode.analytical(point[0]),
            Problem::Pde(pde) => pde.analytical([point[0], point[1]]),
        }
    }

    /// Checks the boundary data without training.
    pub fn validate(&self) -> Result<()> {
        match self {
            Problem::FirstOrder(ode) => FirstOrderFormulation::new(ode.as_ref()).map(drop),
            Problem::SecondOrder(ode) => SecondOrderFormulation::new(ode.as_ref()).map(drop),
            Problem::Pde(pde) => PdeFormulation::new(pde.as_ref()).map(drop),
        }
    }

    pub fn compare(&self, solution: &Solution) -> Option<Comparison> {
        solution.compare(|point| self.analytical(point))
    }

    /// Residual of the analytical solution at `point`, if one is known.
    pub fn analytical_residual(&self, point: &[f64]) -> Result<Option<f64>> {
        let Some(exact) = self.analytical(point) else {
            return Ok(None);
        };
        let residual = match self {
            Problem::FirstOrder(ode) => FirstOrderFormulation::new(ode.as_ref())?
                .partials(point, &exact)
                .residual,
            Problem::SecondOrder(ode) => SecondOrderFormulation::new(ode.as_ref())?
                .partials(point, &exact)
                .residual,
            Problem::Pde(pde) => PdeFormulation::new(pde.as_ref())?
                .partials(point, &exact)
                .residual,
        };
        Ok(Some(residual))
    }
}
