#![deny(warnings)]

//! Economic models: retention-curve and unit-economics helpers for UA
//! campaign projections.
//!
//! This module provides total utilities for:
//! - Two-anchor power-law retention fitting, R(t) = a * t^(-b)
//! - Clamped retention evaluation at an arbitrary day
//! - Cost per install (CPI) and return on ad spend (ROAS)
//!
//! Every helper absorbs degenerate numeric inputs into well-defined values
//! instead of returning errors; the projection contract is total over its
//! numeric domain.

use serde::{Deserialize, Serialize};

/// Power-law retention curve R(t) = a * t^(-b), anchored at day 1 and day 30.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetentionCurve {
    /// Scale coefficient; equals the day-1 retention fraction.
    pub a: f64,
    /// Decay exponent; negative when the day-30 anchor exceeds day 1.
    pub b: f64,
}

impl RetentionCurve {
    /// Fit the curve from fractional anchors r1 = R(1) and r30 = R(30).
    ///
    /// a = r1 directly; b solves r30 = r1 * 30^(-b), so
    /// b = -ln(r30 / r1) / ln(30). Either anchor at zero degenerates to
    /// b = 0 (a flat curve scaled by a).
    ///
    /// Example:
    /// let c = RetentionCurve::fit(0.4, 0.05);
    /// assert!((c.eval(30.0) - 0.05).abs() < 1e-12);
    pub fn fit(r1: f64, r30: f64) -> Self {
        let a = r1;
        let b = if r1 > 0.0 && r30 > 0.0 {
            -(r30 / r1).ln() / 30f64.ln()
        } else {
            0.0
        };
        Self { a, b }
    }

    /// Evaluate retention at day `t`, clamped to [0, 1].
    ///
    /// The curve only activates for a strictly positive day-1 anchor; with
    /// a <= 0 every day evaluates to 0.
    ///
    /// Example:
    /// let c = RetentionCurve::fit(0.0, 0.5);
    /// assert_eq!(c.eval(10.0), 0.0);
    pub fn eval(&self, t: f64) -> f64 {
        if self.a > 0.0 {
            (self.a * t.powf(-self.b)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Cost per install: spend divided by installs, 0 when there are no installs.
///
/// Example:
/// assert_eq!(cpi(5000.0, 10_000.0), 0.5);
/// assert_eq!(cpi(5000.0, 0.0), 0.0);
pub fn cpi(ad_spend: f64, installs: f64) -> f64 {
    if installs > 0.0 {
        ad_spend / installs
    } else {
        0.0
    }
}

/// Return on ad spend as a percentage of CPI recovered, 0 when CPI is 0.
///
/// Example:
/// assert_eq!(roas_pct(0.25, 0.5), 50.0);
pub fn roas_pct(cumulative_ltv: f64, cpi: f64) -> f64 {
    if cpi > 0.0 {
        (cumulative_ltv / cpi) * 100.0
    } else {
        0.0
    }
}
