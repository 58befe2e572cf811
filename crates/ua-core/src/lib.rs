#![deny(warnings)]

//! Core domain models and invariants for UA campaign projections.
//!
//! This crate defines the serializable types shared across the projection
//! pipeline with validation helpers to guarantee basic invariants. The
//! projection itself never fails on unusual numbers; validation is a tool
//! for the caller/UI layer, applied before a projection is requested.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable inputs describing a single UA campaign.
///
/// Retention anchors are percentages in [0, 100]. `retention_d7` is carried
/// for reporting but does not anchor the retention curve; only the day-1 and
/// day-30 points do.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInputs {
    /// Total ad spend in account currency (>= 0).
    pub ad_spend: f64,
    /// Installs attributed to the spend (>= 0).
    pub installs: f64,
    /// Average revenue per daily active user (>= 0).
    pub arpdau: f64,
    /// Day-1 retention percentage.
    pub retention_d1: f64,
    /// Day-7 retention percentage.
    pub retention_d7: f64,
    /// Day-30 retention percentage.
    pub retention_d30: f64,
}

fn clamp_money(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

impl SimulationInputs {
    /// Replace the ad spend, clamping to a finite non-negative value.
    pub fn with_ad_spend(mut self, v: f64) -> Self {
        self.ad_spend = clamp_money(v);
        self
    }

    /// Replace the install count, clamping to a finite non-negative value.
    pub fn with_installs(mut self, v: f64) -> Self {
        self.installs = clamp_money(v);
        self
    }

    /// Replace the ARPDAU, clamping to a finite non-negative value.
    pub fn with_arpdau(mut self, v: f64) -> Self {
        self.arpdau = clamp_money(v);
        self
    }

    /// Replace the day-1 retention percentage, clamping to [0, 100].
    pub fn with_retention_d1(mut self, v: f64) -> Self {
        self.retention_d1 = clamp_percent(v);
        self
    }

    /// Replace the day-7 retention percentage, clamping to [0, 100].
    pub fn with_retention_d7(mut self, v: f64) -> Self {
        self.retention_d7 = clamp_percent(v);
        self
    }

    /// Replace the day-30 retention percentage, clamping to [0, 100].
    pub fn with_retention_d30(mut self, v: f64) -> Self {
        self.retention_d30 = clamp_percent(v);
        self
    }
}

/// One projected day of campaign performance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Day index within the projection window, 1-based.
    pub day: u32,
    /// Fraction of original installs still active, in [0, 1].
    pub retention: f64,
    /// Revenue per install earned on this day (>= 0).
    pub daily_revenue: f64,
    /// Running per-install revenue through this day; non-decreasing.
    #[serde(rename = "cumulativeLTV")]
    pub cumulative_ltv: f64,
    /// Cost per install, constant across the window.
    pub cpi: f64,
    /// True once cumulative LTV has met or exceeded CPI.
    pub is_break_even: bool,
}

/// Aggregate projection outcome for a campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Cost per install.
    pub cpi: f64,
    /// First day where cumulative LTV reached CPI, if any.
    pub break_even_day: Option<u32>,
    /// Percentage of CPI recovered by day 7.
    pub roas_d7: f64,
    /// Percentage of CPI recovered by day 30.
    pub roas_d30: f64,
    /// Projected per-install LTV at day 90.
    pub ltv_d90: f64,
    /// One record per projected day, in ascending day order.
    pub data_points: Vec<DayRecord>,
}

/// Validation errors for campaign inputs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Spend, installs, and ARPDAU must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Retention percentages must be within [0, 100].
    #[error("retention percentage {0} is outside [0, 100]")]
    RetentionOutOfRange(f64),
}

/// Validate campaign inputs before requesting a projection.
pub fn validate_inputs(inputs: &SimulationInputs) -> Result<(), ValidationError> {
    let money = [inputs.ad_spend, inputs.installs, inputs.arpdau];
    if money.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite);
    }
    if money.iter().any(|v| *v < 0.0) {
        return Err(ValidationError::NegativeMoney);
    }
    for r in [
        inputs.retention_d1,
        inputs.retention_d7,
        inputs.retention_d30,
    ] {
        if !r.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        if !(0.0..=100.0).contains(&r) {
            return Err(ValidationError::RetentionOutOfRange(r));
        }
    }
    Ok(())
}
