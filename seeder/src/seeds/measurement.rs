use async_trait::async_trait;
use db::models::measurement::Model as Measurement;
use sea_orm::{DatabaseConnection, DbErr};

use crate::seed::Seeder;

const CENTER_FREQUENCY_HZ: i64 = 2_400_000_000;
const SPAN_HZ: i64 = 100_000_000;
const RETURN_LOSS_RANGE_DB: (f64, f64) = (-40.0, -5.0);

/// Inserts `count` simulated NanoVNA sweep points sharing one session id.
pub struct MeasurementSeeder {
    pub count: usize,
    pub session_id: String,
}

impl MeasurementSeeder {
    pub fn new(count: usize, session_id: impl Into<String>) -> Self {
        Self {
            count,
            session_id: session_id.into(),
        }
    }
}

#[async_trait]
impl Seeder for MeasurementSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let step = if self.count > 1 {
            SPAN_HZ / (self.count as i64 - 1)
        } else {
            0
        };
        let start = CENTER_FREQUENCY_HZ - SPAN_HZ / 2;

        for i in 0..self.count {
            let frequency = if self.count > 1 {
                start + step * i as i64
            } else {
                CENTER_FREQUENCY_HZ
            };
            let return_loss_db = simulated_return_loss();
            let s11 = s11_magnitude(return_loss_db);

            Measurement::create(
                db,
                frequency,
                return_loss_db,
                Some(s11),
                vswr(s11),
                &self.session_id,
            )
            .await?;
        }

        Ok(())
    }
}

fn simulated_return_loss() -> f64 {
    let (min, max) = RETURN_LOSS_RANGE_DB;
    let raw = min + fastrand::f64() * (max - min);
    (raw * 100.0).round() / 100.0
}

/// |S11| from return loss in dB (negative convention).
pub fn s11_magnitude(return_loss_db: f64) -> f64 {
    10f64.powf(return_loss_db / 20.0)
}

pub fn vswr(s11_magnitude: f64) -> f64 {
    let v = (1.0 + s11_magnitude) / (1.0 - s11_magnitude);
    (v * 1000.0).round() / 1000.0
}
