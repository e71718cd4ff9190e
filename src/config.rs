use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    error::SchedError,
    scheduler::{Policy, PolicyKind},
    sim::{ProcessRecord, ScheduleRequest, WorkloadSpec},
};

pub const POLICY_ENV: &str = "SCHED_SIM_POLICY";
pub const QUANTUM_ENV: &str = "SCHED_SIM_QUANTUM";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error(transparent)]
    Sched(#[from] SchedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Policy name, or `all` to compare every policy.
    pub policy: String,
    pub quantum: Option<i64>,
    /// JSON batch: a request object or a bare array of records.
    pub batch: Option<PathBuf>,
    pub workload: WorkloadSpec,
}

// Fields left out of a config file fall back to these; round robin still
// needs an explicit quantum.
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: "all".to_string(),
            quantum: None,
            batch: None,
            workload: WorkloadSpec::default(),
        }
    }
}

impl SimConfig {
    /// Built-in run used when no config file is given: every policy, quantum 2,
    /// generated workload.
    pub fn demo() -> Self {
        Self {
            quantum: Some(2),
            ..Self::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `SCHED_SIM_POLICY` / `SCHED_SIM_QUANTUM` when set.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(policy) = std::env::var(POLICY_ENV) {
            self.policy = policy;
        }
        if let Ok(value) = std::env::var(QUANTUM_ENV) {
            let quantum = value.trim().parse().map_err(|_| ConfigError::Env {
                var: QUANTUM_ENV,
                value: value.clone(),
            })?;
            self.quantum = Some(quantum);
        }
        Ok(self)
    }

    pub fn policies(&self) -> Result<Vec<Policy>, SchedError> {
        if self.policy.trim().eq_ignore_ascii_case("all") {
            return PolicyKind::ALL
                .iter()
                .map(|kind| Policy::parse(kind.as_str(), self.quantum))
                .collect();
        }
        Ok(vec![Policy::parse(&self.policy, self.quantum)?])
    }

    /// Read the batch file if one is configured, otherwise generate one.
    /// A quantum embedded in a request file wins over the configured one.
    pub fn load_batch(&mut self) -> Result<Vec<ProcessRecord>, ConfigError> {
        let Some(path) = &self.batch else {
            return Ok(self.workload.generate());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        if value.is_array() {
            return Ok(serde_json::from_value(value)?);
        }

        let request: ScheduleRequest = serde_json::from_value(value)?;
        request.validate()?;
        if request.quantum.is_some() {
            self.quantum = request.quantum;
        }
        Ok(request.processes)
    }
}
