//! Scenario Composer
//!
//! Builds each flow's payloads, calls the backend once per phase and composes
//! the single-shot results. Selections are validated before any call is made.

use crate::compose::{code_signing, secure_email, tls_handshake, vpn_session};
use crate::inputs::{HybridRun, KemRun, SignatureRun};
use crate::result::{ScenarioKind, ScenarioResult};
use crate::{
    CERTIFICATE_PAYLOAD, DEFAULT_FILE_BYTES, DEFAULT_MESSAGE_BYTES, DEFAULT_VPN_PACKETS,
    SIGNATURE_DELIMITER, VPN_AUTH_CHALLENGE,
};
use pqbench_core::{AlgorithmKind, ConfigurationError, FamilyMarkers, TrialError};
use rand::RngCore;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Single-shot access to the crypto provider for scenario phases
pub trait ScenarioBackend {
    /// Generate a signature key pair, sign `message` and verify it
    fn sign(&mut self, algorithm: &str, message: &[u8]) -> Result<SignatureRun, TrialError>;

    /// Generate a KEM key pair, encapsulate and decapsulate
    fn kem(&mut self, algorithm: &str) -> Result<KemRun, TrialError>;

    /// KEM key exchange followed by AEAD encryption of `plaintext`
    fn hybrid_encrypt(&mut self, algorithm: &str, plaintext: &[u8])
    -> Result<HybridRun, TrialError>;
}

/// A scenario phase failed in the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{scenario} failed for {algorithm}: {source}")]
pub struct ScenarioError {
    /// Flow being composed
    pub scenario: ScenarioKind,
    /// Algorithm whose phase failed
    pub algorithm: String,
    /// Underlying cause
    #[source]
    pub source: TrialError,
}

/// Sizes used by the flows that take one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Secure email message size in bytes
    pub message_bytes: u64,
    /// Code signing file size in bytes
    pub file_bytes: u64,
    /// VPN session length in packets
    pub vpn_packets: u64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            message_bytes: DEFAULT_MESSAGE_BYTES,
            file_bytes: DEFAULT_FILE_BYTES,
            vpn_packets: DEFAULT_VPN_PACKETS,
        }
    }
}

/// A fully specified scenario invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioRequest {
    /// TLS 1.3 handshake
    TlsHandshake {
        /// Key exchange
        kem: String,
        /// Certificate signature
        signature: String,
    },
    /// Secure email
    SecureEmail {
        /// Message signature
        signature: String,
        /// Hybrid encryption KEM
        kem: String,
        /// Message size
        message_bytes: u64,
    },
    /// VPN session
    VpnSession {
        /// Key exchange and re-keying
        kem: String,
        /// Peer authentication
        signature: String,
        /// Session length
        packets: u64,
    },
    /// Code signing
    CodeSigning {
        /// File signature
        signature: String,
        /// File size
        file_bytes: u64,
    },
}

impl ScenarioRequest {
    /// Build a request from the user's algorithm selection
    ///
    /// Fails before any measurement if the flow needs a KEM or signature
    /// algorithm that was not selected.
    pub fn from_selection(
        kind: ScenarioKind,
        kem: Option<&str>,
        signature: Option<&str>,
        params: &ScenarioParams,
    ) -> Result<Self, ConfigurationError> {
        let missing = |needed| ConfigurationError::MissingSelection {
            needed,
            scenario: kind.label().to_string(),
        };
        let signature = signature
            .map(str::to_string)
            .ok_or_else(|| missing(AlgorithmKind::Signature));
        let kem = kem
            .map(str::to_string)
            .ok_or_else(|| missing(AlgorithmKind::Kem));

        Ok(match kind {
            ScenarioKind::TlsHandshake => ScenarioRequest::TlsHandshake {
                kem: kem?,
                signature: signature?,
            },
            ScenarioKind::SecureEmail => ScenarioRequest::SecureEmail {
                signature: signature?,
                kem: kem?,
                message_bytes: params.message_bytes,
            },
            ScenarioKind::VpnSession => ScenarioRequest::VpnSession {
                kem: kem?,
                signature: signature?,
                packets: params.vpn_packets,
            },
            ScenarioKind::CodeSigning => ScenarioRequest::CodeSigning {
                signature: signature?,
                file_bytes: params.file_bytes,
            },
        })
    }

    /// Flow this request runs
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioRequest::TlsHandshake { .. } => ScenarioKind::TlsHandshake,
            ScenarioRequest::SecureEmail { .. } => ScenarioKind::SecureEmail,
            ScenarioRequest::VpnSession { .. } => ScenarioKind::VpnSession,
            ScenarioRequest::CodeSigning { .. } => ScenarioKind::CodeSigning,
        }
    }
}

/// Names of the supported flows
pub fn available_scenarios() -> Vec<&'static str> {
    ScenarioKind::ALL.iter().map(|k| k.label()).collect()
}

/// Drives a backend through scenario flows
pub struct ScenarioComposer<'a, B: ?Sized, R = ThreadRng> {
    backend: &'a mut B,
    markers: FamilyMarkers,
    rng: R,
}

impl<'a, B: ScenarioBackend + ?Sized> ScenarioComposer<'a, B, ThreadRng> {
    /// Composer drawing random payloads from the thread-local generator
    pub fn new(backend: &'a mut B, markers: FamilyMarkers) -> Self {
        Self::with_rng(backend, markers, rand::thread_rng())
    }
}

impl<'a, B, R> ScenarioComposer<'a, B, R>
where
    B: ScenarioBackend + ?Sized,
    R: RngCore,
{
    /// Composer with an explicit payload generator
    pub fn with_rng(backend: &'a mut B, markers: FamilyMarkers, rng: R) -> Self {
        Self {
            backend,
            markers,
            rng,
        }
    }

    /// Run one scenario
    pub fn run(&mut self, request: &ScenarioRequest) -> Result<ScenarioResult, ScenarioError> {
        let kind = request.kind();
        debug!(scenario = %kind, "composing scenario");

        let result = match request {
            ScenarioRequest::TlsHandshake { kem, signature } => {
                let certificate = self.sign(kind, signature, CERTIFICATE_PAYLOAD)?;
                let exchange = self.kem(kind, kem)?;
                tls_handshake(&certificate, &exchange, &self.markers)
            }
            ScenarioRequest::SecureEmail {
                signature,
                kem,
                message_bytes,
            } => {
                let message = self.random_payload(*message_bytes);
                let signed = self.sign(kind, signature, &message)?;

                let mut bundle = message;
                bundle.extend_from_slice(SIGNATURE_DELIMITER);
                bundle.extend(self.random_payload(signed.signature_bytes));

                let encryption = self
                    .backend
                    .hybrid_encrypt(kem, &bundle)
                    .map_err(|source| failure(kind, kem, source))?;
                secure_email(&signed, &encryption, *message_bytes, &self.markers)
            }
            ScenarioRequest::VpnSession {
                kem,
                signature,
                packets,
            } => {
                let auth = self.sign(kind, signature, VPN_AUTH_CHALLENGE)?;
                let exchange = self.kem(kind, kem)?;
                vpn_session(&auth, &exchange, *packets, &self.markers)
            }
            ScenarioRequest::CodeSigning {
                signature,
                file_bytes,
            } => {
                let file = self.random_payload(*file_bytes);
                let signed = self.sign(kind, signature, &file)?;
                code_signing(&signed, *file_bytes, &self.markers)
            }
        };

        info!(
            scenario = %kind,
            algorithms = %result.algorithms(),
            total_ms = result.total_time_ms,
            bandwidth = result.total_bandwidth_bytes,
            "scenario composed"
        );
        Ok(result)
    }

    /// Run several scenarios, isolating failures per request
    pub fn run_all(
        &mut self,
        requests: &[ScenarioRequest],
    ) -> (Vec<ScenarioResult>, Vec<ScenarioError>) {
        let mut results = Vec::with_capacity(requests.len());
        let mut errors = Vec::new();
        for request in requests {
            match self.run(request) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(error = %e, "scenario skipped");
                    errors.push(e);
                }
            }
        }
        (results, errors)
    }

    fn sign(
        &mut self,
        kind: ScenarioKind,
        algorithm: &str,
        message: &[u8],
    ) -> Result<SignatureRun, ScenarioError> {
        self.backend
            .sign(algorithm, message)
            .map_err(|source| failure(kind, algorithm, source))
    }

    fn kem(&mut self, kind: ScenarioKind, algorithm: &str) -> Result<KemRun, ScenarioError> {
        self.backend
            .kem(algorithm)
            .map_err(|source| failure(kind, algorithm, source))
    }

    fn random_payload(&mut self, len: u64) -> Vec<u8> {
        let mut buf = vec![0u8; len as usize];
        self.rng.fill_bytes(&mut buf);
        buf
    }
}

fn failure(scenario: ScenarioKind, algorithm: &str, source: TrialError) -> ScenarioError {
    ScenarioError {
        scenario,
        algorithm: algorithm.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Records the payloads it is handed
    #[derive(Default)]
    struct FixedBackend {
        signed: Vec<Vec<u8>>,
        encrypted: Vec<usize>,
        fail_kem: bool,
    }

    impl ScenarioBackend for FixedBackend {
        fn sign(&mut self, algorithm: &str, message: &[u8]) -> Result<SignatureRun, TrialError> {
            self.signed.push(message.to_vec());
            Ok(SignatureRun {
                algorithm: algorithm.to_string(),
                keygen_ms: 1.0,
                sign_ms: 2.0,
                verify_ms: 3.0,
                public_key_bytes: 100,
                signature_bytes: 50,
            })
        }

        fn kem(&mut self, algorithm: &str) -> Result<KemRun, TrialError> {
            if self.fail_kem {
                return Err(TrialError::Unsupported(algorithm.to_string()));
            }
            Ok(KemRun {
                algorithm: algorithm.to_string(),
                keygen_ms: 4.0,
                encaps_ms: 5.0,
                decaps_ms: 6.0,
                public_key_bytes: 200,
                ciphertext_bytes: 80,
            })
        }

        fn hybrid_encrypt(
            &mut self,
            algorithm: &str,
            plaintext: &[u8],
        ) -> Result<HybridRun, TrialError> {
            self.encrypted.push(plaintext.len());
            Ok(HybridRun {
                kem: self.kem(algorithm)?,
                aead_encrypt_ms: 0.1,
                aead_decrypt_ms: 0.1,
                plaintext_bytes: plaintext.len() as u64,
                ciphertext_bytes: plaintext.len() as u64 + 16,
            })
        }
    }

    fn composer(backend: &mut FixedBackend) -> ScenarioComposer<'_, FixedBackend, StdRng> {
        ScenarioComposer::with_rng(backend, FamilyMarkers::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_missing_selection_rejected() {
        let params = ScenarioParams::default();
        let err = ScenarioRequest::from_selection(
            ScenarioKind::TlsHandshake,
            None,
            Some("ML-DSA-65"),
            &params,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingSelection {
                needed: AlgorithmKind::Kem,
                scenario: "TLS 1.3 Handshake".to_string(),
            }
        );

        let err = ScenarioRequest::from_selection(
            ScenarioKind::CodeSigning,
            Some("ML-KEM-768"),
            None,
            &params,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingSelection {
                needed: AlgorithmKind::Signature,
                ..
            }
        ));
    }

    #[test]
    fn test_code_signing_needs_no_kem() {
        let request = ScenarioRequest::from_selection(
            ScenarioKind::CodeSigning,
            None,
            Some("Falcon-512"),
            &ScenarioParams::default(),
        )
        .unwrap();
        assert_eq!(
            request,
            ScenarioRequest::CodeSigning {
                signature: "Falcon-512".to_string(),
                file_bytes: 1_048_576,
            }
        );
    }

    #[test]
    fn test_tls_uses_certificate_payload() {
        let mut backend = FixedBackend::default();
        let request = ScenarioRequest::TlsHandshake {
            kem: "ML-KEM-768".to_string(),
            signature: "ML-DSA-65".to_string(),
        };
        let result = composer(&mut backend).run(&request).unwrap();

        assert_eq!(result.total_bandwidth_bytes, 780);
        assert_eq!(backend.signed, vec![CERTIFICATE_PAYLOAD.to_vec()]);
    }

    #[test]
    fn test_email_encrypts_signed_bundle() {
        let mut backend = FixedBackend::default();
        let request = ScenarioRequest::SecureEmail {
            signature: "ML-DSA-44".to_string(),
            kem: "ML-KEM-512".to_string(),
            message_bytes: 1024,
        };
        let result = composer(&mut backend).run(&request).unwrap();

        assert_eq!(backend.signed[0].len(), 1024);
        assert_eq!(backend.encrypted, vec![1024 + SIGNATURE_DELIMITER.len() + 50]);
        assert_eq!(result.kind, ScenarioKind::SecureEmail);
    }

    #[test]
    fn test_backend_failure_names_algorithm() {
        let mut backend = FixedBackend {
            fail_kem: true,
            ..Default::default()
        };
        let requests = [
            ScenarioRequest::VpnSession {
                kem: "HQC-256".to_string(),
                signature: "Falcon-1024".to_string(),
                packets: 40,
            },
            ScenarioRequest::CodeSigning {
                signature: "Falcon-1024".to_string(),
                file_bytes: 4096,
            },
        ];
        let (results, errors) = composer(&mut backend).run_all(&requests);

        assert_eq!(results.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].algorithm, "HQC-256");
        assert_eq!(errors[0].scenario, ScenarioKind::VpnSession);
    }

    #[test]
    fn test_available_scenarios() {
        let names = available_scenarios();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "TLS 1.3 Handshake");
    }
}
