// Conversion metrics module
//
// Counts how configuration objects were obtained and persisted

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Configuration access metrics
///
/// Uses atomic operations so a shared manager can record without locks.
#[derive(Debug)]
pub struct Metrics {
    /// Objects served from their XML copy
    pub xml_loads: AtomicU64,

    /// Objects parsed from legacy text
    pub legacy_parses: AtomicU64,

    /// XML copies written after a legacy parse
    pub xml_conversions: AtomicU64,

    /// XML copies that could not be written back
    pub xml_conversion_failures: AtomicU64,

    /// XML copies that existed but could not be parsed
    pub xml_parse_failures: AtomicU64,

    /// Legacy files that were missing when requested
    pub missing_files: AtomicU64,

    /// Successful saves (text or XML)
    pub saves: AtomicU64,

    /// Failed saves
    pub save_failures: AtomicU64,

    /// Total time spent parsing legacy text in microseconds
    pub total_parse_time_us: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            xml_loads: AtomicU64::new(0),
            legacy_parses: AtomicU64::new(0),
            xml_conversions: AtomicU64::new(0),
            xml_conversion_failures: AtomicU64::new(0),
            xml_parse_failures: AtomicU64::new(0),
            missing_files: AtomicU64::new(0),
            saves: AtomicU64::new(0),
            save_failures: AtomicU64::new(0),
            total_parse_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_xml_load(&self) {
        self.xml_loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a legacy parse and how long it took
    pub fn record_legacy_parse(&self, duration: Duration) {
        self.legacy_parses.fetch_add(1, Ordering::Relaxed);
        self.total_parse_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_xml_conversion(&self) {
        self.xml_conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_xml_conversion_failure(&self) {
        self.xml_conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_xml_parse_failure(&self) {
        self.xml_parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_file(&self) {
        self.missing_files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save(&self) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_failure(&self) {
        self.save_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average legacy parse time in microseconds
    pub fn avg_parse_time_us(&self) -> f64 {
        let total = self.total_parse_time_us.load(Ordering::Relaxed);
        let count = self.legacy_parses.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Configuration Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Loads: {} from XML, {} from legacy text (avg {:.0}us), {} missing",
            self.xml_loads.load(Ordering::Relaxed),
            self.legacy_parses.load(Ordering::Relaxed),
            self.avg_parse_time_us(),
            self.missing_files.load(Ordering::Relaxed)
        );
        tracing::info!(
            "XML copies: {} written, {} write failures, {} unreadable",
            self.xml_conversions.load(Ordering::Relaxed),
            self.xml_conversion_failures.load(Ordering::Relaxed),
            self.xml_parse_failures.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Saves: {} ok, {} failed",
            self.saves.load(Ordering::Relaxed),
            self.save_failures.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
