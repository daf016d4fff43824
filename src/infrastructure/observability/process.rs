// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::domain::models::metric::MetricSample;
use crate::utils::errors::ProcessMetricsError;

pub const CPU_SECONDS_METRIC: &str = "solr_process_cpu_seconds_total";
pub const RESIDENT_MEMORY_METRIC: &str = "solr_process_resident_memory_bytes";
pub const VIRTUAL_MEMORY_METRIC: &str = "solr_process_virtual_memory_bytes";
pub const START_TIME_METRIC: &str = "solr_process_start_time_seconds";
pub const OPEN_FDS_METRIC: &str = "solr_process_open_fds";
pub const MAX_FDS_METRIC: &str = "solr_process_max_fds";

/// 进程指标的帮助文本
pub fn help_for(metric: &str) -> Option<&'static str> {
    let help = match metric {
        CPU_SECONDS_METRIC => "Total user and system CPU time of the Solr process in seconds.",
        RESIDENT_MEMORY_METRIC => "Resident memory size of the Solr process in bytes.",
        VIRTUAL_MEMORY_METRIC => "Virtual memory size of the Solr process in bytes.",
        START_TIME_METRIC => "Start time of the Solr process since unix epoch in seconds.",
        OPEN_FDS_METRIC => "Number of open file descriptors of the Solr process.",
        MAX_FDS_METRIC => "Maximum number of open file descriptors of the Solr process.",
        _ => return None,
    };
    Some(help)
}

/// 从 PID 文件读取进程号
pub fn read_pid(path: &Path) -> Result<u32, ProcessMetricsError> {
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| ProcessMetricsError::InvalidPid(trimmed.to_string()))
}

/// Solr 进程指标采集器
///
/// 每次采集都重新读取 PID 文件，Solr 重启后无需重启导出器。
pub struct ProcessCollector {
    pid_file: PathBuf,
    system: Mutex<System>,
}

impl ProcessCollector {
    pub fn new(pid_file: impl Into<PathBuf>) -> Self {
        Self {
            pid_file: pid_file.into(),
            system: Mutex::new(System::new()),
        }
    }

    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    /// 采集 CPU、内存、启动时间与文件描述符指标
    pub fn collect(&self) -> Result<Vec<MetricSample>, ProcessMetricsError> {
        let pid = read_pid(&self.pid_file)?;
        let sys_pid = Pid::from_u32(pid);

        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        let process = system
            .process(sys_pid)
            .ok_or(ProcessMetricsError::ProcessNotFound(pid))?;

        let mut samples = vec![
            MetricSample::counter(
                CPU_SECONDS_METRIC,
                process.accumulated_cpu_time() as f64 / 1000.0,
            ),
            MetricSample::gauge(RESIDENT_MEMORY_METRIC, process.memory() as f64),
            MetricSample::gauge(VIRTUAL_MEMORY_METRIC, process.virtual_memory() as f64),
            MetricSample::gauge(START_TIME_METRIC, process.start_time() as f64),
        ];
        drop(system);

        samples.extend(fd_samples(pid));
        Ok(samples)
    }
}

#[cfg(target_os = "linux")]
fn fd_samples(pid: u32) -> Vec<MetricSample> {
    let mut samples = Vec::with_capacity(2);

    match fs::read_dir(format!("/proc/{}/fd", pid)) {
        Ok(entries) => {
            let open = entries.filter_map(Result::ok).count();
            samples.push(MetricSample::gauge(OPEN_FDS_METRIC, open as f64));
        }
        Err(err) => debug!(pid, error = %err, "Cannot read open file descriptors"),
    }

    match fs::read_to_string(format!("/proc/{}/limits", pid)) {
        Ok(limits) => {
            if let Some(max) = parse_max_open_files(&limits) {
                samples.push(MetricSample::gauge(MAX_FDS_METRIC, max));
            }
        }
        Err(err) => debug!(pid, error = %err, "Cannot read process limits"),
    }

    samples
}

#[cfg(not(target_os = "linux"))]
fn fd_samples(_pid: u32) -> Vec<MetricSample> {
    Vec::new()
}

/// 解析 `/proc/<pid>/limits` 中的 "Max open files" 软限制
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_max_open_files(limits: &str) -> Option<f64> {
    let line = limits.lines().find(|l| l.starts_with("Max open files"))?;
    let soft = line
        .trim_start_matches("Max open files")
        .split_whitespace()
        .next()?;
    if soft == "unlimited" {
        return None;
    }
    soft.parse().ok()
}
