#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    last_mark: Instant,
    peak_memory_mb: u64,
}

/// Per-phase timing and resident memory of the current process.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    pid: Option<Pid>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let start_time = Instant::now();
        if !enabled {
            return Self {
                state: None,
                pid: None,
                start_time,
            };
        }

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("Process statistics unavailable: {}", e);
                None
            }
        };

        Self {
            state: Some(Mutex::new(MonitorState {
                system: System::new(),
                last_mark: start_time,
                peak_memory_mb: 0,
            })),
            pid,
            start_time,
        }
    }

    /// Closes the phase that started at the previous mark.
    pub fn mark(&self, phase: &str) -> Option<PhaseStats> {
        let mut state = self.state.as_ref()?.lock().ok()?;
        let now = Instant::now();

        let memory_usage_mb = match self.pid {
            Some(pid) => {
                state.system.refresh_processes_specifics(
                    ProcessesToUpdate::Some(&[pid]),
                    true,
                    ProcessRefreshKind::nothing().with_memory(),
                );
                state
                    .system
                    .process(pid)
                    .map(|process| process.memory() / 1024 / 1024)
                    .unwrap_or(0)
            }
            None => 0,
        };
        state.peak_memory_mb = state.peak_memory_mb.max(memory_usage_mb);

        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_time: now.duration_since(state.last_mark),
            elapsed_time: now.duration_since(self.start_time),
            memory_usage_mb,
            peak_memory_mb: state.peak_memory_mb,
        };
        state.last_mark = now;
        Some(stats)
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.mark(phase) {
            tracing::info!(
                phase = %stats.phase,
                phase_ms = stats.phase_time.as_millis() as u64,
                memory_mb = stats.memory_usage_mb,
                peak_mb = stats.peak_memory_mb,
                "📊 phase finished"
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.mark("total") {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.mark("fetch").is_none());
    }

    #[test]
    fn test_enabled_monitor_tracks_phases() {
        let monitor = SystemMonitor::new(true);
        assert!(monitor.is_enabled());

        let first = monitor.mark("fetch").unwrap();
        let second = monitor.mark("parse").unwrap();

        assert_eq!(first.phase, "fetch");
        assert_eq!(second.phase, "parse");
        assert!(second.elapsed_time >= first.elapsed_time);
        assert!(second.peak_memory_mb >= first.memory_usage_mb);
    }
}
