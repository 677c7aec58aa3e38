#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub since_start: Duration,
}

/// Samples this process's CPU and memory after each pipeline stage.
#[cfg(feature = "cli")]
pub struct StageMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    samples: Mutex<Vec<StageStats>>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().ok();
        if pid.is_none() && enabled {
            tracing::warn!("Could not resolve current PID, stage monitoring disabled");
        }
        if enabled {
            system.refresh_all();
        }

        Self {
            system: Mutex::new(system),
            enabled: enabled && pid.is_some(),
            pid,
            start_time: Instant::now(),
            samples: Mutex::new(Vec::new()),
        }
    }

    pub fn sample(&self, stage: &str) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }
        let pid = self.pid?;

        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let process = system.process(pid)?;

        let stats = StageStats {
            stage: stage.to_string(),
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: process.memory() / 1024 / 1024,
            since_start: self.start_time.elapsed(),
        };
        self.samples.lock().ok()?.push(stats.clone());
        Some(stats)
    }

    pub fn log_stage(&self, stage: &str) {
        if let Some(stats) = self.sample(stage) {
            tracing::info!(
                stage = %stats.stage,
                cpu = %format!("{:.1}%", stats.cpu_usage),
                memory_mb = stats.memory_usage_mb,
                elapsed = ?stats.since_start,
                "stage finished"
            );
        }
    }

    pub fn peak_memory_mb(&self) -> u64 {
        self.samples
            .lock()
            .map(|s| s.iter().map(|x| x.memory_usage_mb).max().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn log_summary(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Generation took {:?}, peak memory {}MB",
                self.start_time.elapsed(),
                self.peak_memory_mb()
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct StageMonitor;

#[cfg(not(feature = "cli"))]
impl StageMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stage(&self, _stage: &str) {}

    pub fn log_summary(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = StageMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.sample("extract").is_none());
        assert_eq!(monitor.peak_memory_mb(), 0);
    }

    #[test]
    fn test_enabled_monitor_samples_stage() {
        let monitor = StageMonitor::new(true);
        if let Some(stats) = monitor.sample("transform") {
            assert_eq!(stats.stage, "transform");
            assert!(monitor.peak_memory_mb() >= stats.memory_usage_mb);
        }
    }
}
