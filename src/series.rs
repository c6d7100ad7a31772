//! Immutable sample storage for a single chart.

use thiserror::Error;

/// Errors raised while building a [`SampleSeries`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// The series cannot be spread across the plot width.
    #[error("a line chart needs at least {required} samples, got {actual}")]
    TooFewSamples {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples provided.
        actual: usize,
    },
    /// A sample is NaN or infinite.
    #[error("sample {index} is not a finite number")]
    NonFinite {
        /// Position of the offending sample.
        index: usize,
    },
}

/// Ordered chart samples with cached extremes.
///
/// Insertion order is the X ordering: sample `i` is drawn at the `i`-th
/// equally spaced column of the plot area. The series always holds at least
/// [`SampleSeries::MIN_SAMPLES`] finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl SampleSeries {
    /// Minimum number of samples a chart can plot.
    pub const MIN_SAMPLES: usize = 2;

    /// Create a series from owned values.
    pub fn new(values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() < Self::MIN_SAMPLES {
            return Err(SeriesError::TooFewSamples {
                required: Self::MIN_SAMPLES,
                actual: values.len(),
            });
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, value) in values.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(SeriesError::NonFinite { index });
            }
            min = min.min(value);
            max = max.max(value);
        }

        Ok(Self { values, min, max })
    }

    /// Build a series from an iterator of values.
    pub fn from_iter_y<I, T>(iter: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Self::new(iter.into_iter().map(Into::into).collect())
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Access all samples in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Access a single sample.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Smallest sample.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Difference between the largest and smallest sample.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl TryFrom<Vec<f64>> for SampleSeries {
    type Error = SeriesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for SampleSeries {
    type Error = SeriesError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::new(values.to_vec())
    }
}
