//! Return loss to water content conversion.
//!
//! `kadar_air = 0.0054 * RL^2 - 0.0238 * RL - 12.081`, rounded to two decimals
//! (half away from zero). Every caller in the workspace goes through [`derive`].

use crate::error::WaterContentError;
use tracing::warn;

const A: f64 = 0.0054;
const B: f64 = -0.0238;
const C: f64 = -12.081;

/// Typical NanoVNA return loss window in dB. Values outside are accepted but logged.
pub const TYPICAL_RANGE_DB: (f64, f64) = (-60.0, 0.0);

pub const FORMULA: &str = "kadar_air = 0.0054 * return_loss^2 - 0.0238 * return_loss - 12.081";

pub fn derive(return_loss_db: f64) -> f64 {
    let raw = A * return_loss_db.powi(2) + B * return_loss_db + C;
    round2(raw)
}

/// Fails on NaN or infinite input. Out of range values only warn.
pub fn validate(return_loss_db: f64) -> Result<(), WaterContentError> {
    if !return_loss_db.is_finite() {
        return Err(WaterContentError::InvalidInput(format!(
            "Return loss must be a valid number, got {return_loss_db}"
        )));
    }

    let (low, high) = TYPICAL_RANGE_DB;
    if return_loss_db < low || return_loss_db > high {
        warn!(
            return_loss_db,
            "Return loss is outside typical range ({low} to {high} dB)"
        );
    }

    Ok(())
}

/// Substituted form shown to clients, e.g.
/// `0.0054 * -15^2 - 0.0238 * -15 - 12.081 = -10.51%`.
pub fn raw_calculation(return_loss_db: f64, water_content_percent: f64) -> String {
    format!(
        "0.0054 * {return_loss_db}^2 - 0.0238 * {return_loss_db} - 12.081 = {water_content_percent}%"
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
