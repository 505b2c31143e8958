//! Configuration loading from pqbench.toml
//!
//! pqbench configuration can be specified in a `pqbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use pqbench_core::{ConfigurationError, FamilyMarkers};
use pqbench_scenarios::{
    DEFAULT_FILE_BYTES, DEFAULT_MESSAGE_BYTES, DEFAULT_VPN_PACKETS, ScenarioParams,
};
use pqbench_stats::{
    DEFAULT_EFFICIENCY_WEIGHT, DEFAULT_IQR_THRESHOLD, EfficiencyWeights, OutlierMethod,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "pqbench.toml";

/// Allowed distance of `weight_time + weight_size` from 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// pqbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PqbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Outlier detection configuration
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Efficiency score weights
    #[serde(default)]
    pub efficiency: EfficiencyConfig,
    /// Scenario selection
    #[serde(default)]
    pub scenarios: ScenariosConfig,
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Trials per algorithm; defaults to the smallest recorded trial count
    #[serde(default)]
    pub iterations: Option<usize>,
    /// Path of the recorded trial log
    #[serde(default)]
    pub input: Option<String>,
}

/// Outlier detection method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethodName {
    /// Interquartile range fences
    #[default]
    Iqr,
    /// Standard score
    Zscore,
}

/// Outlier detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// "iqr" or "zscore"
    #[serde(default)]
    pub outlier_method: OutlierMethodName,
    /// IQR multiplier or number of standard deviations
    #[serde(default = "default_outlier_threshold")]
    pub outlier_threshold: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethodName::default(),
            outlier_threshold: default_outlier_threshold(),
        }
    }
}

impl StatisticsConfig {
    /// Detector settings for the reduction step
    pub fn method(&self) -> OutlierMethod {
        match self.outlier_method {
            OutlierMethodName::Iqr => OutlierMethod::Iqr {
                threshold: self.outlier_threshold,
            },
            OutlierMethodName::Zscore => OutlierMethod::ZScore {
                threshold: self.outlier_threshold,
            },
        }
    }

    /// Reject a threshold that is not a positive finite number
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.outlier_threshold.is_finite() && self.outlier_threshold > 0.0 {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidThreshold(self.outlier_threshold))
        }
    }
}

fn default_outlier_threshold() -> f64 {
    DEFAULT_IQR_THRESHOLD
}

/// Efficiency score weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfficiencyConfig {
    /// Weight of normalised total time
    #[serde(default = "default_weight")]
    pub weight_time: f64,
    /// Weight of normalised bandwidth
    #[serde(default = "default_weight")]
    pub weight_size: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            weight_time: default_weight(),
            weight_size: default_weight(),
        }
    }
}

impl EfficiencyConfig {
    /// Weights for the ranker
    pub fn weights(&self) -> EfficiencyWeights {
        EfficiencyWeights {
            time: self.weight_time,
            size: self.weight_size,
        }
    }

    /// Reject weights that could push a score outside [0, 100]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        let sum = self.weight_time + self.weight_size;
        if valid(self.weight_time)
            && valid(self.weight_size)
            && (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
        {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidWeights {
                time: self.weight_time,
                size: self.weight_size,
            })
        }
    }
}

fn default_weight() -> f64 {
    DEFAULT_EFFICIENCY_WEIGHT
}

/// Scenario selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenariosConfig {
    /// Flows to compose after the batch
    #[serde(default)]
    pub enabled: Vec<String>,
    /// KEM used by the flows that need one
    #[serde(default)]
    pub kem: Option<String>,
    /// Signature algorithm used by every flow
    #[serde(default)]
    pub signature: Option<String>,
    /// Secure email message size in bytes
    #[serde(default = "default_message_size")]
    pub message_size: u64,
    /// Code signing file size in bytes
    #[serde(default = "default_file_size")]
    pub file_size: u64,
    /// VPN session length in packets
    #[serde(default = "default_vpn_packets")]
    pub vpn_packets: u64,
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            kem: None,
            signature: None,
            message_size: default_message_size(),
            file_size: default_file_size(),
            vpn_packets: default_vpn_packets(),
        }
    }
}

impl ScenariosConfig {
    /// Sizes handed to the composer
    pub fn params(&self) -> ScenarioParams {
        ScenarioParams {
            message_bytes: self.message_size,
            file_bytes: self.file_size,
            vpn_packets: self.vpn_packets,
        }
    }
}

fn default_message_size() -> u64 {
    DEFAULT_MESSAGE_BYTES
}
fn default_file_size() -> u64 {
    DEFAULT_FILE_BYTES
}
fn default_vpn_packets() -> u64 {
    DEFAULT_VPN_PACKETS
}

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Recommendation profile: general, iot, server, mobile, high_security
    #[serde(default = "default_use_case")]
    pub use_case: String,
    /// Override of the post-quantum name markers
    #[serde(default)]
    pub pqc_markers: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            use_case: default_use_case(),
            pqc_markers: None,
        }
    }
}

impl AnalysisConfig {
    /// Family classifier built from the configured markers
    pub fn markers(&self) -> FamilyMarkers {
        match &self.pqc_markers {
            Some(markers) => FamilyMarkers::new(markers.iter().cloned()),
            None => FamilyMarkers::default(),
        }
    }
}

fn default_use_case() -> String {
    "general".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: human, json, csv
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory that receives JSON and CSV reports when `--output` is absent;
    /// empty keeps them on stdout
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/pqbench".to_string()
}

impl PqbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check the numeric settings before any trial runs
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.statistics.validate()?;
        self.efficiency.validate()
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# pqbench Configuration

[runner]
# Trials per algorithm (defaults to the smallest recorded trial count)
# iterations = 100
# Recorded trial log to replay (uncomment to enable)
# input = "trials.json"

[statistics]
# Outlier detection: "iqr" or "zscore"
outlier_method = "iqr"
# IQR multiplier, or standard deviations for zscore
outlier_threshold = 1.5

[efficiency]
# Relative weight of time and size in the efficiency score (must sum to 1)
weight_time = 0.5
weight_size = 0.5

[scenarios]
# Flows to compose: tls-handshake, secure-email, vpn-session, code-signing
enabled = []
# Algorithms used by the flows (uncomment to enable)
# kem = "ML-KEM-768"
# signature = "ML-DSA-65"
# Secure email message size in bytes
message_size = 10240
# Code signing file size in bytes
file_size = 1048576
# VPN session length in packets
vpn_packets = 100

[analysis]
# Recommendation profile: general, iot, server, mobile, high_security
use_case = "general"
# Name substrings that mark an algorithm as post-quantum (uncomment to override)
# pqc_markers = ["Kyber", "ML-KEM", "Dilithium", "ML-DSA", "Falcon", "SPHINCS"]

[output]
# Default output format: human, json, csv
format = "human"
# Directory for JSON and CSV reports when --output is absent ("" prints to stdout)
directory = "target/pqbench"
"#
        .to_string()
    }
}
