#![deny(warnings)]

//! Day-by-day LTV projection for a UA campaign.
//!
//! Drives the retention curve from `ua-econ` over a fixed 90-day window,
//! accumulating per-install revenue and detecting the break-even day, then
//! aggregates the headline KPIs into a `SimulationResult`. The whole
//! pipeline is a pure function of its inputs: no I/O, no randomness, no
//! shared state, and no failure mode for any numeric input.

use ua_core::{DayRecord, SimulationInputs, SimulationResult};
use ua_econ::{cpi, roas_pct, RetentionCurve};

/// Length of the projection window in days.
pub const HORIZON_DAYS: u32 = 90;

/// Checkpoint days for the early and late ROAS readings.
pub const ROAS_EARLY_DAY: u32 = 7;
pub const ROAS_LATE_DAY: u32 = 30;

/// Project campaign performance over the 90-day window.
///
/// Day 1 uses the raw day-1 anchor rather than the fitted formula; later
/// days evaluate the power-law curve, which clamps each value to [0, 1].
/// Break-even is sticky: once cumulative LTV reaches CPI it stays flagged,
/// since the cumulative series is non-decreasing.
pub fn project(inputs: &SimulationInputs) -> SimulationResult {
    let cpi = cpi(inputs.ad_spend, inputs.installs);
    let r1 = inputs.retention_d1 / 100.0;
    let r30 = inputs.retention_d30 / 100.0;
    let curve = RetentionCurve::fit(r1, r30);

    let mut data_points = Vec::with_capacity(HORIZON_DAYS as usize);
    let mut cumulative_ltv = 0.0f64;
    let mut break_even_day = None;

    for day in 1..=HORIZON_DAYS {
        let retention = if day == 1 {
            r1.clamp(0.0, 1.0)
        } else {
            curve.eval(f64::from(day))
        };

        let daily_revenue = inputs.arpdau * retention;
        cumulative_ltv += daily_revenue;

        let is_break_even = cumulative_ltv >= cpi;
        if is_break_even && break_even_day.is_none() {
            break_even_day = Some(day);
        }

        data_points.push(DayRecord {
            day,
            retention,
            daily_revenue,
            cumulative_ltv,
            cpi,
            is_break_even,
        });
    }

    let roas_d7 = roas_pct(ltv_at_day(&data_points, ROAS_EARLY_DAY), cpi);
    let roas_d30 = roas_pct(ltv_at_day(&data_points, ROAS_LATE_DAY), cpi);
    let ltv_d90 = ltv_at_day(&data_points, HORIZON_DAYS);

    SimulationResult {
        cpi,
        break_even_day,
        roas_d7,
        roas_d30,
        ltv_d90,
        data_points,
    }
}

/// Cumulative LTV recorded on the given 1-based day, 0 when out of range.
pub fn ltv_at_day(data_points: &[DayRecord], day: u32) -> f64 {
    day.checked_sub(1)
        .and_then(|idx| data_points.get(idx as usize))
        .map_or(0.0, |record| record.cumulative_ltv)
}
