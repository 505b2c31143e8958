//! Scenario Results

use pqbench_core::Family;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported protocol flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Certificate signature plus KEM key exchange
    TlsHandshake,
    /// Signed then hybrid-encrypted message
    SecureEmail,
    /// Authenticated key exchange with periodic re-keying
    VpnSession,
    /// Signature over a distributed file
    CodeSigning,
}

impl ScenarioKind {
    /// Every supported flow
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::TlsHandshake,
        ScenarioKind::SecureEmail,
        ScenarioKind::VpnSession,
        ScenarioKind::CodeSigning,
    ];

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::TlsHandshake => "TLS 1.3 Handshake",
            ScenarioKind::SecureEmail => "Secure Email (S/MIME-like)",
            ScenarioKind::VpnSession => "VPN Session",
            ScenarioKind::CodeSigning => "Code Signing",
        }
    }

    /// Identifier used in configuration files and on the command line
    pub fn slug(self) -> &'static str {
        match self {
            ScenarioKind::TlsHandshake => "tls-handshake",
            ScenarioKind::SecureEmail => "secure-email",
            ScenarioKind::VpnSession => "vpn-session",
            ScenarioKind::CodeSigning => "code-signing",
        }
    }

    /// Whether the flow includes a key exchange
    pub fn needs_kem(self) -> bool {
        !matches!(self, ScenarioKind::CodeSigning)
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('_', "-");
        ScenarioKind::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| format!("Unknown scenario: {}", s))
    }
}

/// One timed step of a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Step name
    pub name: String,
    /// Elapsed milliseconds
    pub millis: f64,
}

impl Phase {
    pub(crate) fn new(name: &str, millis: f64) -> Self {
        Self {
            name: name.to_string(),
            millis,
        }
    }
}

/// Flow-specific accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioDetails {
    /// TLS message sizes
    Tls {
        /// KEM public key plus overhead
        client_hello_bytes: u64,
        /// Certificate key, signature, KEM ciphertext plus overhead
        server_hello_bytes: u64,
        /// Final acknowledgement
        client_final_bytes: u64,
        /// Handshake round trips
        round_trips: f64,
    },
    /// Email sizes
    Email {
        /// Original message
        message_bytes: u64,
        /// KEM ciphertext, AEAD ciphertext and nonce
        encrypted_bytes: u64,
        /// 100 * (encrypted - original) / original
        overhead_pct: f64,
    },
    /// VPN session accounting
    Vpn {
        /// Session length in packets
        packets: u64,
        /// Authentication plus initial key exchange
        handshake_ms: f64,
        /// Number of re-keyings
        rekey_count: u64,
        /// Time spent re-keying
        rekey_overhead_ms: f64,
        /// Total time over packets (0 for an empty session)
        avg_per_packet_ms: f64,
    },
    /// Code signing sizes
    CodeSigning {
        /// Signed file size
        file_bytes: u64,
        /// Signature bytes
        signature_bytes: u64,
        /// Verification key bytes
        public_key_bytes: u64,
        /// 100 * signature / file
        overhead_pct: f64,
    },
}

/// Output of one scenario composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Flow simulated
    pub kind: ScenarioKind,
    /// KEM used, if the flow has a key exchange
    pub kem_algorithm: Option<String>,
    /// Signature scheme used
    pub signature_algorithm: Option<String>,
    /// Post-quantum if any constituent algorithm is
    pub family: Family,
    /// Timed steps, in protocol order
    pub phases: Vec<Phase>,
    /// Sum of phase timings
    pub total_time_ms: f64,
    /// Bytes exchanged, protocol overhead included
    pub total_bandwidth_bytes: u64,
    /// Flow-specific accounting
    pub details: ScenarioDetails,
}

impl ScenarioResult {
    /// Timing of a named phase
    pub fn phase(&self, name: &str) -> Option<f64> {
        self.phases.iter().find(|p| p.name == name).map(|p| p.millis)
    }

    /// Protocol overhead percentage, for flows that define one
    pub fn overhead_pct(&self) -> Option<f64> {
        match self.details {
            ScenarioDetails::Email { overhead_pct, .. }
            | ScenarioDetails::CodeSigning { overhead_pct, .. } => Some(overhead_pct),
            _ => None,
        }
    }

    /// Algorithms involved, joined for display
    pub fn algorithms(&self) -> String {
        [&self.signature_algorithm, &self.kem_algorithm]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
