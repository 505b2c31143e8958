//! Pure Scenario Compositions
//!
//! Each function combines already measured single-shot runs with fixed
//! protocol constants. Nothing here measures or mutates anything.

use crate::inputs::{HybridRun, KemRun, SignatureRun};
use crate::result::{Phase, ScenarioDetails, ScenarioKind, ScenarioResult};
use crate::{
    AEAD_NONCE_BYTES, TLS_CLIENT_FINISHED_BYTES, TLS_CLIENT_HELLO_OVERHEAD, TLS_ROUND_TRIPS,
    TLS_SERVER_HELLO_OVERHEAD, VPN_REKEY_INTERVAL,
};
use pqbench_core::FamilyMarkers;

fn percent_of(part: f64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (100.0 * part) / whole as f64
    }
}

fn total(phases: &[Phase]) -> f64 {
    phases.iter().map(|p| p.millis).sum()
}

/// TLS 1.3 handshake: certificate signature plus KEM key exchange
pub fn tls_handshake(
    certificate: &SignatureRun,
    kem: &KemRun,
    markers: &FamilyMarkers,
) -> ScenarioResult {
    let phases = vec![
        Phase::new("Server Cert Gen", certificate.keygen_ms),
        Phase::new("Client KEM Gen", kem.keygen_ms),
        Phase::new("Cert Sign", certificate.sign_ms),
        Phase::new("Cert Verify", certificate.verify_ms),
        Phase::new("Encapsulate", kem.encaps_ms),
        Phase::new("Decapsulate", kem.decaps_ms),
    ];

    let client_hello_bytes = kem.public_key_bytes + TLS_CLIENT_HELLO_OVERHEAD;
    let server_hello_bytes = certificate.public_key_bytes
        + certificate.signature_bytes
        + kem.ciphertext_bytes
        + TLS_SERVER_HELLO_OVERHEAD;
    let client_final_bytes = TLS_CLIENT_FINISHED_BYTES;

    ScenarioResult {
        kind: ScenarioKind::TlsHandshake,
        kem_algorithm: Some(kem.algorithm.clone()),
        signature_algorithm: Some(certificate.algorithm.clone()),
        family: markers.classify_all([certificate.algorithm.as_str(), kem.algorithm.as_str()]),
        total_time_ms: total(&phases),
        phases,
        total_bandwidth_bytes: client_hello_bytes + server_hello_bytes + client_final_bytes,
        details: ScenarioDetails::Tls {
            client_hello_bytes,
            server_hello_bytes,
            client_final_bytes,
            round_trips: TLS_ROUND_TRIPS,
        },
    }
}

/// Secure email: sign the message, then hybrid-encrypt the signed bundle
///
/// `message_bytes` is the original message length; `encryption` covers the
/// bundle of message, delimiter and signature.
pub fn secure_email(
    signature: &SignatureRun,
    encryption: &HybridRun,
    message_bytes: u64,
    markers: &FamilyMarkers,
) -> ScenarioResult {
    let phases = vec![
        Phase::new("Signing KeyGen", signature.keygen_ms),
        Phase::new("KEM KeyGen", encryption.kem.keygen_ms),
        Phase::new("Sign", signature.sign_ms),
        Phase::new("Encrypt", encryption.total_encrypt_ms()),
        Phase::new("Decrypt", encryption.total_decrypt_ms()),
        Phase::new("Verify", signature.verify_ms),
    ];

    let encrypted_bytes =
        encryption.kem.ciphertext_bytes + encryption.ciphertext_bytes + AEAD_NONCE_BYTES;
    let overhead_pct = percent_of(
        encrypted_bytes as f64 - message_bytes as f64,
        message_bytes,
    );

    ScenarioResult {
        kind: ScenarioKind::SecureEmail,
        kem_algorithm: Some(encryption.kem.algorithm.clone()),
        signature_algorithm: Some(signature.algorithm.clone()),
        family: markers.classify_all([
            signature.algorithm.as_str(),
            encryption.kem.algorithm.as_str(),
        ]),
        total_time_ms: total(&phases),
        phases,
        total_bandwidth_bytes: encrypted_bytes,
        details: ScenarioDetails::Email {
            message_bytes,
            encrypted_bytes,
            overhead_pct,
        },
    }
}

/// VPN session: authenticated handshake, then one re-keying every
/// `VPN_REKEY_INTERVAL` packets
pub fn vpn_session(
    auth: &SignatureRun,
    kem: &KemRun,
    packets: u64,
    markers: &FamilyMarkers,
) -> ScenarioResult {
    let handshake_ms = auth.total_ms() + kem.total_ms();
    let rekey_count = packets / VPN_REKEY_INTERVAL;
    let rekey_overhead_ms = rekey_count as f64 * kem.exchange_ms();
    let total_time_ms = handshake_ms + rekey_overhead_ms;
    let avg_per_packet_ms = if packets == 0 {
        0.0
    } else {
        total_time_ms / packets as f64
    };

    let phases = vec![
        Phase::new("Auth KeyGen", auth.keygen_ms),
        Phase::new("Auth Sign", auth.sign_ms),
        Phase::new("Auth Verify", auth.verify_ms),
        Phase::new("KEM KeyGen", kem.keygen_ms),
        Phase::new("Encapsulate", kem.encaps_ms),
        Phase::new("Decapsulate", kem.decaps_ms),
        Phase::new("Re-keying", rekey_overhead_ms),
    ];

    let total_bandwidth_bytes = auth.public_key_bytes
        + auth.signature_bytes
        + kem.public_key_bytes
        + kem.ciphertext_bytes * (1 + rekey_count);

    ScenarioResult {
        kind: ScenarioKind::VpnSession,
        kem_algorithm: Some(kem.algorithm.clone()),
        signature_algorithm: Some(auth.algorithm.clone()),
        family: markers.classify_all([auth.algorithm.as_str(), kem.algorithm.as_str()]),
        phases,
        total_time_ms,
        total_bandwidth_bytes,
        details: ScenarioDetails::Vpn {
            packets,
            handshake_ms,
            rekey_count,
            rekey_overhead_ms,
            avg_per_packet_ms,
        },
    }
}

/// Code signing: one signature over a `file_bytes` payload
pub fn code_signing(
    signature: &SignatureRun,
    file_bytes: u64,
    markers: &FamilyMarkers,
) -> ScenarioResult {
    let phases = vec![
        Phase::new("KeyGen", signature.keygen_ms),
        Phase::new("Sign", signature.sign_ms),
        Phase::new("Verify", signature.verify_ms),
    ];

    ScenarioResult {
        kind: ScenarioKind::CodeSigning,
        kem_algorithm: None,
        signature_algorithm: Some(signature.algorithm.clone()),
        family: markers.classify(&signature.algorithm),
        total_time_ms: total(&phases),
        phases,
        total_bandwidth_bytes: signature.signature_bytes + signature.public_key_bytes,
        details: ScenarioDetails::CodeSigning {
            file_bytes,
            signature_bytes: signature.signature_bytes,
            public_key_bytes: signature.public_key_bytes,
            overhead_pct: percent_of(signature.signature_bytes as f64, file_bytes),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqbench_core::Family;

    fn signature(name: &str) -> SignatureRun {
        SignatureRun {
            algorithm: name.to_string(),
            keygen_ms: 1.0,
            sign_ms: 2.0,
            verify_ms: 3.0,
            public_key_bytes: 100,
            signature_bytes: 50,
        }
    }

    fn kem(name: &str) -> KemRun {
        KemRun {
            algorithm: name.to_string(),
            keygen_ms: 4.0,
            encaps_ms: 5.0,
            decaps_ms: 6.0,
            public_key_bytes: 200,
            ciphertext_bytes: 80,
        }
    }

    #[test]
    fn test_tls_handshake_accounting() {
        let result = tls_handshake(
            &signature("SECP256R1 (P-256)"),
            &kem("ML-KEM-768"),
            &FamilyMarkers::default(),
        );

        assert!((result.total_time_ms - 21.0).abs() < f64::EPSILON);
        assert_eq!(result.total_bandwidth_bytes, 780);
        assert_eq!(result.family, Family::PostQuantum);
        assert_eq!(result.phases.len(), 6);
        match result.details {
            ScenarioDetails::Tls {
                client_hello_bytes,
                server_hello_bytes,
                client_final_bytes,
                round_trips,
            } => {
                assert_eq!(client_hello_bytes, 300);
                assert_eq!(server_hello_bytes, 430);
                assert_eq!(client_final_bytes, 50);
                assert!((round_trips - 1.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_tls_classic_pair() {
        let result = tls_handshake(
            &signature("SECP384R1 (P-384)"),
            &kem("RSA-2048"),
            &FamilyMarkers::default(),
        );
        assert_eq!(result.family, Family::Classic);
    }

    #[test]
    fn test_vpn_rekeying() {
        let mut k = kem("Kyber768");
        k.encaps_ms = 4.0;
        k.decaps_ms = 6.0;
        let result = vpn_session(&signature("Dilithium3"), &k, 100, &FamilyMarkers::default());

        let ScenarioDetails::Vpn {
            handshake_ms,
            rekey_count,
            rekey_overhead_ms,
            avg_per_packet_ms,
            ..
        } = result.details
        else {
            panic!("expected VPN details");
        };
        assert_eq!(rekey_count, 5);
        assert!((rekey_overhead_ms - 50.0).abs() < 1e-12);
        assert!((handshake_ms - 20.0).abs() < 1e-12);
        assert!((result.total_time_ms - 70.0).abs() < 1e-12);
        assert!((avg_per_packet_ms - 0.7).abs() < 1e-12);
        assert_eq!(result.total_bandwidth_bytes, 100 + 50 + 200 + 80 * 6);
    }

    #[test]
    fn test_vpn_zero_packets() {
        let result = vpn_session(
            &signature("Falcon-512"),
            &kem("HQC-128"),
            0,
            &FamilyMarkers::default(),
        );
        let ScenarioDetails::Vpn {
            rekey_count,
            avg_per_packet_ms,
            ..
        } = result.details
        else {
            panic!("expected VPN details");
        };
        assert_eq!(rekey_count, 0);
        assert_eq!(avg_per_packet_ms, 0.0);
        assert!((result.total_time_ms - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_code_signing_overhead() {
        let mut sig = signature("Dilithium2");
        sig.signature_bytes = 2_700;
        let result = code_signing(&sig, 1_000_000, &FamilyMarkers::default());

        assert_eq!(result.overhead_pct(), Some(0.27));
        assert_eq!(result.total_bandwidth_bytes, 2_800);
        assert!(result.kem_algorithm.is_none());
        assert!((result.total_time_ms - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_secure_email_overhead() {
        let encryption = HybridRun {
            kem: kem("ML-KEM-512"),
            aead_encrypt_ms: 0.5,
            aead_decrypt_ms: 0.25,
            plaintext_bytes: 1000 + 11 + 50,
            ciphertext_bytes: 1000 + 11 + 50 + 16,
        };
        let result = secure_email(
            &signature("ML-DSA-44"),
            &encryption,
            1000,
            &FamilyMarkers::default(),
        );

        // 80 + 1077 + 12
        assert_eq!(result.total_bandwidth_bytes, 1169);
        let overhead = result.overhead_pct().unwrap();
        assert!((overhead - 16.9).abs() < 1e-9);
        // 1 + 4 + 2 + (5 + 0.5) + (6 + 0.25) + 3
        assert!((result.total_time_ms - 21.75).abs() < 1e-12);
    }

    #[test]
    fn test_secure_email_empty_message() {
        let encryption = HybridRun {
            kem: kem("BIKE-L1"),
            aead_encrypt_ms: 0.0,
            aead_decrypt_ms: 0.0,
            plaintext_bytes: 61,
            ciphertext_bytes: 77,
        };
        let result = secure_email(
            &signature("RSA-2048"),
            &encryption,
            0,
            &FamilyMarkers::default(),
        );
        assert_eq!(result.overhead_pct(), Some(0.0));
    }
}
