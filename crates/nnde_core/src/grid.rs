use crate::equation::Endpoint;
use crate::error::{NndeError, Result};
use serde::{Deserialize, Serialize};

/// Ordered training points, all of the same dimension. Fixed for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    dimension: usize,
    points: Vec<Vec<f64>>,
}

impl TrainingSet {
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self> {
        let dimension = match points.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => {
                return Err(NndeError::InvalidTrainingSet(
                    "training points must have at least one coordinate".into(),
                ))
            }
            None => return Err(NndeError::InvalidTrainingSet("training set is empty".into())),
        };
        for (i, point) in points.iter().enumerate() {
            if point.len() != dimension {
                return Err(NndeError::InvalidTrainingSet(format!(
                    "point {} has dimension {}, expected {}",
                    i,
                    point.len(),
                    dimension
                )));
            }
            if point.iter().any(|x| !x.is_finite()) {
                return Err(NndeError::InvalidTrainingSet(format!(
                    "point {} has a non-finite coordinate",
                    i
                )));
            }
        }
        Ok(Self { dimension, points })
    }

    /// `count` points spaced `(max - min)/count` apart, skipping the end
    /// that carries the initial condition.
    pub fn interval_excluding(min: f64, max: f64, count: usize, end: Endpoint) -> Result<Self> {
        if count == 0 {
            return Err(NndeError::InvalidTrainingSet(
                "at least one training point is required".into(),
            ));
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(NndeError::InvalidTrainingSet(format!(
                "domain [{}, {}] is empty or not finite",
                min, max
            )));
        }
        let dx = (max - min) / count as f64;
        let offset = match end {
            Endpoint::Min => 1.0,
            Endpoint::Max => 0.0,
        };
        Self::new(
            (0..count)
                .map(|i| vec![min + (i as f64 + offset) * dx])
                .collect(),
        )
    }

    /// `count` evenly spaced points over `[0, 1]`, both ends included.
    pub fn unit_interval(count: usize) -> Result<Self> {
        Self::new(unit_axis(count)?.into_iter().map(|x| vec![x]).collect())
    }

    /// `count × count` points over the unit square, x varying fastest.
    pub fn unit_square(count: usize) -> Result<Self> {
        let axis = unit_axis(count)?;
        let points = axis
            .iter()
            .flat_map(|&y| axis.iter().map(move |&x| vec![x, y]))
            .collect();
        Self::new(points)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.points.iter().map(Vec::as_slice)
    }
}

fn unit_axis(count: usize) -> Result<Vec<f64>> {
    if count < 2 {
        return Err(NndeError::InvalidTrainingSet(format!(
            "an inclusive grid needs at least 2 points per axis, got {}",
            count
        )));
    }
    let step = 1.0 / (count - 1) as f64;
    Ok((0..count).map(|i| i as f64 * step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn interval_skips_the_condition_end() {
        let set = TrainingSet::interval_excluding(0.0, 1.0, 10, Endpoint::Min).unwrap();
        assert_eq!(set.len(), 10);
        assert_abs_diff_eq!(set.points()[0][0], 0.1, epsilon = 1e-15);
        assert_abs_diff_eq!(set.points()[9][0], 1.0, epsilon = 1e-15);

        let set = TrainingSet::interval_excluding(-1.0, 1.0, 4, Endpoint::Max).unwrap();
        let xs: Vec<f64> = set.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5]);
    }

    #[test]
    fn square_is_ordered_x_fastest() {
        let set = TrainingSet::unit_square(3).unwrap();
        assert_eq!(set.dimension(), 2);
        assert_eq!(set.len(), 9);
        assert_eq!(set.points()[1], vec![0.5, 0.0]);
        assert_eq!(set.points()[3], vec![0.0, 0.5]);
        assert_eq!(set.points()[8], vec![1.0, 1.0]);
    }

    #[test]
    fn malformed_sets_are_rejected() {
        assert!(TrainingSet::new(vec![]).is_err());
        assert!(TrainingSet::new(vec![vec![]]).is_err());
        assert!(TrainingSet::new(vec![vec![0.0], vec![0.0, 1.0]]).is_err());
        assert!(TrainingSet::new(vec![vec![f64::NAN]]).is_err());
        assert!(TrainingSet::unit_interval(1).is_err());
        assert!(TrainingSet::unit_square(0).is_err());
        assert!(TrainingSet::interval_excluding(0.0, 1.0, 0, Endpoint::Min).is_err());
        assert!(TrainingSet::interval_excluding(1.0, 1.0, 5, Endpoint::Min).is_err());
    }
}
