//! Stats - Derived Statistics and Visual Encodings
//!
//! Extrema are recomputed from the current data whenever it changes; nothing
//! here holds state.

use crate::constants::{COLOR_CHANNEL_MAX, NODE_RADIUS_SCALE};
use crate::utils::format::format_fixed;

/// Max/min of a numeric series, or `Unavailable` when there is nothing to measure
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extrema {
    #[default]
    Unavailable,
    Range { max: f64, min: f64 },
}

impl Extrema {
    pub fn max(&self) -> Option<f64> {
        match self {
            Extrema::Range { max, .. } => Some(*max),
            Extrema::Unavailable => None,
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self {
            Extrema::Range { min, .. } => Some(*min),
            Extrema::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Extrema::Range { .. })
    }

    /// Position of `value` within `[min, max]`, clamped to `[0, 1]`
    ///
    /// A degenerate range (max == min) maps every value to 1.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        let Extrema::Range { max, min } = *self else {
            return None;
        };
        if !value.is_finite() {
            return None;
        }
        let span = max - min;
        if span <= f64::EPSILON {
            return Some(1.0);
        }
        Some(((value - min) / span).clamp(0.0, 1.0))
    }

    /// Legend label for the maximum ("unavailable" when empty)
    pub fn max_label(&self) -> String {
        self.max()
            .map(|max| format_fixed(max, 2))
            .unwrap_or_else(|| "unavailable".to_string())
    }
}

/// Compute `{max, min}` over a series, ignoring non-finite samples
pub fn compute_extrema(series: &[f64]) -> Extrema {
    series
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(Extrema::Unavailable, |acc, v| match acc {
            Extrema::Unavailable => Extrema::Range { max: v, min: v },
            Extrema::Range { max, min } => Extrema::Range {
                max: max.max(v),
                min: min.min(v),
            },
        })
}

/// Line color for a loading risk value, scaled against the maximum
///
/// The red channel grows with the risk; the others are fixed.
pub fn loading_risk_color(value: f64, extrema: &Extrema) -> [u8; 3] {
    let red = match extrema.max() {
        Some(max) if max > 0.0 && value.is_finite() => {
            (value * COLOR_CHANNEL_MAX / max).clamp(0.0, COLOR_CHANNEL_MAX) as u8
        }
        _ => 0,
    };
    [red, 140, 255]
}

/// Marker radius for a node risk value
pub fn node_risk_radius(value: f64) -> f64 {
    if value.is_finite() {
        (value * NODE_RADIUS_SCALE).max(0.0)
    } else {
        0.0
    }
}
