use crate::models::Decision;

/// Classify a released drag offset
///
/// Past `threshold` to the right accepts, past it to the left rejects.
/// Anything within the threshold is undecided, and so is NaN since it
/// compares false both ways. Infinities fall on the matching side.
#[inline]
pub fn classify(offset: f64, threshold: f64) -> Decision {
    if offset > threshold {
        Decision::Accept
    } else if offset < -threshold {
        Decision::Reject
    } else {
        Decision::None
    }
}

/// Fixed-threshold classifier
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    threshold: f64,
}

impl Classifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold: threshold.abs() }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn classify(&self, offset: f64) -> Decision {
        classify(offset, self.threshold)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(100.0)
    }
}
