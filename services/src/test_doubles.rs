//! In-memory stores used by the service tests.

use async_trait::async_trait;
use chrono::Utc;
use db::models::measurement::Model as Measurement;
use db::models::water_content::{HistoryEntry, Model as WaterContent, NewWaterContent};
use db::repositories::{MeasurementSource, WaterContentStore};
use sea_orm::DbErr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn measurement(id: i64, return_loss_db: f64, frequency: i64) -> Measurement {
    Measurement {
        id,
        frequency,
        return_loss_db,
        s11_magnitude: Some(0.18),
        vswr: 1.43,
        session_id: "session-1".into(),
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct FakeMeasurements {
    rows: Mutex<Vec<Measurement>>,
    pub fail: AtomicBool,
}

impl FakeMeasurements {
    pub fn with(rows: Vec<Measurement>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail: AtomicBool::new(false),
        }
    }

    pub fn push(&self, m: Measurement) {
        self.rows.lock().unwrap().push(m);
    }

    fn check(&self) -> Result<(), DbErr> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MeasurementSource for FakeMeasurements {
    async fn latest(&self) -> Result<Option<Measurement>, DbErr> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().max_by_key(|m| m.id).cloned())
    }

    async fn by_id(&self, id: i64) -> Result<Option<Measurement>, DbErr> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, DbErr> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Measurement>, DbErr> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

/// Records inserts so tests can assert on call counts.
#[derive(Default)]
pub struct FakeWaterContent {
    rows: Mutex<Vec<WaterContent>>,
    pub inserts: AtomicUsize,
    pub fail_insert: AtomicBool,
    pub fail_reads: AtomicBool,
    /// Reports every measurement as processed while holding no rows.
    pub phantom_exists: AtomicBool,
    pub insert_delay: Option<Duration>,
}

impl FakeWaterContent {
    pub fn slow(delay: Duration) -> Self {
        Self {
            insert_delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<WaterContent> {
        self.rows.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), DbErr> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("read timeout".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl WaterContentStore for FakeWaterContent {
    async fn exists_for_measurement(&self, measurement_id: i64) -> Result<bool, DbErr> {
        self.check_reads()?;
        if self.phantom_exists.load(Ordering::SeqCst) {
            return Ok(true);
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|r| r.measurement_id == measurement_id))
    }

    async fn insert(&self, record: NewWaterContent) -> Result<WaterContent, DbErr> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.insert_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("insert rejected".into()));
        }

        let mut rows = self.rows.lock().unwrap();
        let saved = WaterContent {
            id: rows.len() as i64 + 1,
            measurement_id: record.measurement_id,
            return_loss_db: record.return_loss_db,
            water_content_percent: record.water_content_percent,
            frequency: record.frequency,
            session_id: record.session_id,
            notes: record.notes,
            timestamp: Utc::now(),
        };
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn by_measurement(&self, measurement_id: i64) -> Result<Vec<WaterContent>, DbErr> {
        self.check_reads()?;
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.measurement_id == measurement_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(rows)
    }

    async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, DbErr> {
        self.check_reads()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        rows.truncate(limit as usize);
        Ok(rows
            .into_iter()
            .map(|record| HistoryEntry {
                record,
                nanovna_measurements: None,
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, DbErr> {
        self.check_reads()?;
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}
