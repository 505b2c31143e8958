#![warn(missing_docs)]
//! pqbench Scenarios - Protocol Composition
//!
//! Composes single-shot primitive measurements into simulations of real
//! protocol flows with bandwidth and round-trip accounting:
//! - TLS 1.3 handshake (certificate signature + key exchange)
//! - Secure email (sign, then hybrid-encrypt the signed bundle)
//! - VPN session (authenticated handshake plus periodic re-keying)
//! - Code signing (one signature over a distributed file)
//!
//! The composition functions are pure. `ScenarioComposer` drives a
//! `ScenarioBackend` once per phase and feeds the results through them.

mod compose;
mod composer;
mod inputs;
mod result;

pub use compose::{code_signing, secure_email, tls_handshake, vpn_session};
pub use composer::{
    ScenarioBackend, ScenarioComposer, ScenarioError, ScenarioParams, ScenarioRequest,
    available_scenarios,
};
pub use inputs::{HybridRun, KemRun, SignatureRun};
pub use result::{Phase, ScenarioDetails, ScenarioKind, ScenarioResult};

/// Protocol overhead added to the ClientHello, in bytes
pub const TLS_CLIENT_HELLO_OVERHEAD: u64 = 100;

/// Protocol overhead added to the ServerHello, in bytes
pub const TLS_SERVER_HELLO_OVERHEAD: u64 = 200;

/// Size of the client's final acknowledgement, in bytes
pub const TLS_CLIENT_FINISHED_BYTES: u64 = 50;

/// Round trips of a full TLS 1.3 handshake (1-RTT plus the final flight)
pub const TLS_ROUND_TRIPS: f64 = 1.5;

/// Packets between two VPN re-keyings
pub const VPN_REKEY_INTERVAL: u64 = 20;

/// AEAD nonce carried alongside every hybrid ciphertext
pub const AEAD_NONCE_BYTES: u64 = 12;

/// Separator between a message and its appended signature
pub const SIGNATURE_DELIMITER: &[u8] = b"|SIGNATURE|";

/// Payload signed as the server certificate
pub const CERTIFICATE_PAYLOAD: &[u8] = b"server-certificate-data";

/// Payload signed during VPN authentication
pub const VPN_AUTH_CHALLENGE: &[u8] = b"vpn-auth-challenge";

/// Default secure email message size
pub const DEFAULT_MESSAGE_BYTES: u64 = 10 * 1024;

/// Default code signing file size
pub const DEFAULT_FILE_BYTES: u64 = 1024 * 1024;

/// Default VPN session length in packets
pub const DEFAULT_VPN_PACKETS: u64 = 100;
