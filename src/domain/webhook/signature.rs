//! Webhook signature verification.
//!
//! Verifies the processor's `t=<unix-ts>,v1=<hex>[,v1=<hex>...]` header with
//! HMAC-SHA256 over `"{timestamp}.{payload}"`. Several `v1` values may be
//! present while the processor rolls its signing secret; any match is enough.
//!
//! Verification is pure: the caller supplies "now", normally the time the
//! request was received.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::VerificationError;

type HmacSha256 = Hmac<Sha256>;

/// Default freshness window for webhook timestamps (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Inbound webhook exactly as it came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWebhookRequest {
    payload: Vec<u8>,
    signature_header: String,
    received_at: DateTime<Utc>,
}

impl RawWebhookRequest {
    pub fn new(
        payload: impl Into<Vec<u8>>,
        signature_header: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            payload: payload.into(),
            signature_header: signature_header.into(),
            received_at,
        }
    }

    /// Creates a request stamped with the current time.
    pub fn received_now(payload: impl Into<Vec<u8>>, signature_header: impl Into<String>) -> Self {
        Self::new(payload, signature_header, Utc::now())
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Payload together with the components extracted from its signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload<'a> {
    payload: &'a [u8],
    timestamp: i64,
    signatures: Vec<String>,
}

impl<'a> SignedPayload<'a> {
    /// Parses a signature header for the given payload.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...]`. Unknown keys
    /// and pieces without `=` are skipped for forward compatibility.
    ///
    /// # Errors
    ///
    /// Returns `VerificationError::MalformedHeader` if the timestamp is missing
    /// or not an integer, or if no `v1` signature is present.
    pub fn parse(payload: &'a [u8], header: &str) -> Result<Self, VerificationError> {
        let mut timestamp: Option<i64> = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "t" => {
                    let parsed = value.parse().map_err(|_| {
                        VerificationError::MalformedHeader(format!("invalid timestamp: {value}"))
                    })?;
                    timestamp = Some(parsed);
                }
                "v1" if !value.is_empty() => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| VerificationError::MalformedHeader("missing timestamp".to_string()))?;
        if signatures.is_empty() {
            return Err(VerificationError::MalformedHeader(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(Self {
            payload,
            timestamp,
            signatures,
        })
    }

    /// Parses the header carried by a raw request.
    pub fn from_request(request: &'a RawWebhookRequest) -> Result<Self, VerificationError> {
        Self::parse(request.payload(), request.signature_header())
    }

    pub fn payload(&self) -> &[u8] {
        self.payload
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }
}

/// A payload proven to come from the processor.
///
/// Only [`WebhookVerifier`] can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEvent {
    payload: Vec<u8>,
    signed_at: i64,
}

impl VerifiedEvent {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Unix timestamp from the verified signature header.
    pub fn signed_at(&self) -> i64 {
        self.signed_at
    }

    #[cfg(test)]
    pub(crate) fn for_test(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            signed_at: Utc::now().timestamp(),
        }
    }
}

/// Verifier for processor webhook signatures.
#[derive(Clone)]
pub struct WebhookVerifier {
    /// The webhook signing secret (`whsec_...`).
    secret: SecretString,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// Creates a verifier with the given signing secret and freshness window.
    pub fn new(secret: impl Into<String>, tolerance: Duration) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            tolerance_secs: i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Creates a verifier using the default 300 second tolerance.
    pub fn with_default_tolerance(secret: impl Into<String>) -> Self {
        Self::new(secret, Duration::from_secs(DEFAULT_TOLERANCE_SECS))
    }

    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_secs.unsigned_abs())
    }

    /// Verifies a parsed signature against its payload.
    ///
    /// # Verification Steps
    ///
    /// 1. Compute the expected HMAC-SHA256 signature
    /// 2. Compare it against every `v1` value in constant time
    /// 3. Reject timestamps older than the tolerance window
    ///
    /// # Errors
    ///
    /// - `SignatureMismatch` - no `v1` value matches
    /// - `TimestampTooOld` - signature is valid but stale
    pub fn verify(
        &self,
        signed: &SignedPayload<'_>,
        now: DateTime<Utc>,
    ) -> Result<VerifiedEvent, VerificationError> {
        let expected = self.compute_signature(signed.timestamp, signed.payload);

        let matched = signed.signatures.iter().fold(false, |found, candidate| {
            found | constant_time_compare(expected.as_bytes(), candidate.as_bytes())
        });
        if !matched {
            return Err(VerificationError::SignatureMismatch);
        }

        let age_secs = now.timestamp().saturating_sub(signed.timestamp);
        if age_secs > self.tolerance_secs {
            return Err(VerificationError::TimestampTooOld {
                age_secs,
                tolerance_secs: self.tolerance_secs,
            });
        }

        Ok(VerifiedEvent {
            payload: signed.payload.to_vec(),
            signed_at: signed.timestamp,
        })
    }

    /// Parses and verifies a raw request, using its receipt time as "now".
    pub fn verify_request(
        &self,
        request: &RawWebhookRequest,
    ) -> Result<VerifiedEvent, VerificationError> {
        let signed = SignedPayload::from_request(request)?;
        self.verify(&signed, request.received_at())
    }

    /// Computes the lowercase hex HMAC-SHA256 signature for a payload.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a signature header value for test fixtures.
#[cfg(test)]
pub fn sign_for_test(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
