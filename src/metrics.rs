use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub users_created: Arc<AtomicU64>,
    pub users_updated: Arc<AtomicU64>,
    pub users_deleted: Arc<AtomicU64>,
    pub payloads_scanned: Arc<AtomicU64>,
    pub payloads_rejected: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            users_created: Arc::new(AtomicU64::new(0)),
            users_updated: Arc::new(AtomicU64::new(0)),
            users_deleted: Arc::new(AtomicU64::new(0)),
            payloads_scanned: Arc::new(AtomicU64::new(0)),
            payloads_rejected: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_users_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_users_updated(&self) {
        self.users_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_users_deleted(&self) {
        self.users_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_payloads_scanned(&self) {
        self.payloads_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_payloads_rejected(&self) {
        self.payloads_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            users_created: self.users_created.load(Ordering::Relaxed),
            users_updated: self.users_updated.load(Ordering::Relaxed),
            users_deleted: self.users_deleted.load(Ordering::Relaxed),
            payloads_scanned: self.payloads_scanned.load(Ordering::Relaxed),
            payloads_rejected: self.payloads_rejected.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub users_created: u64,
    pub users_updated: u64,
    pub users_deleted: u64,
    pub payloads_scanned: u64,
    pub payloads_rejected: u64,
    pub uptime_seconds: u64,
}
