//! # Search Grid
//!
//! Uniform thickness samples `0, Δ, 2Δ, …, max` for one material axis.

use crate::error::{Result, ShieldError};

/// Ordered, finite, non-decreasing thickness candidates
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGrid {
    values: Vec<f64>,
}

impl SearchGrid {
    /// `steps` evenly spaced points from 0 to `max_thickness` inclusive
    ///
    /// A single step yields the lone point 0. The last point is exactly
    /// `max_thickness` and no point exceeds it.
    pub fn linspace(max_thickness: f64, steps: usize) -> Result<Self> {
        if !(max_thickness.is_finite() && max_thickness >= 0.0) {
            return Err(ShieldError::InvalidGrid {
                reason: format!("maximum thickness {} must be finite and >= 0", max_thickness),
            });
        }
        if steps == 0 {
            return Err(ShieldError::InvalidGrid {
                reason: "at least one step is required".to_string(),
            });
        }

        let values = if steps == 1 {
            vec![0.0]
        } else {
            let last = (steps - 1) as f64;
            let mut values: Vec<f64> = (0..steps)
                .map(|i| (max_thickness * i as f64 / last).min(max_thickness))
                .collect();
            // max·i/(n-1) can round above max at i = n-1
            if let Some(end) = values.last_mut() {
                *end = max_thickness;
            }
            values
        };

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Spacing between neighbouring points (0 for a single point)
    pub fn spacing(&self) -> f64 {
        match self.values.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}
