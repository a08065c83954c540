use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::ClaimSet;
use super::errors::TokenError;

/// Number of dot-separated segments in a compact token.
const TOKEN_SEGMENTS: usize = 3;

/// Signing method written into every header and the only one accepted back.
const SIGNING_METHOD: Algorithm = Algorithm::HS256;
const SIGNING_METHOD_NAME: &str = "HS256";

/// Header fields inspected before any signature work is done.
#[derive(Debug, Deserialize)]
struct SegmentHeader {
    alg: String,
}

/// Signed token codec.
///
/// Tokens are JWS compact strings (`header.payload.signature`, base64url)
/// signed with HMAC-SHA256 over `header.payload`. Validation runs its checks
/// in a fixed order: structure, signing method, signature, then the
/// `iat`/`exp` window. Time checks only ever see claims whose signature
/// has been accepted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    has_key: bool,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Shared secret used to sign and verify tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - An empty secret is accepted here but every `issue` call will fail
    pub fn new(secret: &[u8]) -> Self {
        // Expiry is checked by the codec itself so that `exp == now` is
        // rejected and the check can run against an explicit clock.
        let mut validation = Validation::new(SIGNING_METHOD);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            has_key: !secret.is_empty(),
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Arguments
    /// * `claims` - Claims to carry
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `SigningFailure` - Signing key is empty or the signing primitive failed
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        if !self.has_key {
            return Err(TokenError::SigningFailure(
                "signing key must not be empty".to_string(),
            ));
        }

        encode(&Header::new(SIGNING_METHOD), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailure(e.to_string()))
    }

    /// Validate a token against the current time.
    ///
    /// See [`TokenCodec::validate_at`].
    pub fn validate(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit Unix timestamp.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `now` - Current time (Unix seconds, UTC)
    ///
    /// # Returns
    /// The claims the token was issued with
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, or a segment does not decode
    /// * `InvalidSigningMethod` - Header names another algorithm
    /// * `BadSignature` - Signature does not match `header.payload`
    /// * `NotYetValid` - `now` is before `iat`
    /// * `Expired` - `now` is at or after `exp`
    pub fn validate_at(&self, token: &str, now: i64) -> Result<ClaimSet, TokenError> {
        let header_segment = Self::header_segment(token)?;
        Self::check_signing_method(header_segment)?;

        let claims = decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(Self::classify)?;

        if claims.is_not_yet_valid(now) {
            return Err(TokenError::NotYetValid);
        }
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Decode claims without any validation (for inspection only).
    ///
    /// # Security Warning
    /// Neither the signature nor the time window is checked. Only use the
    /// result for diagnostics, never for authorization decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let mut validation = self.validation.clone();
        validation.insecure_disable_signature_validation();

        decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    fn header_segment(token: &str) -> Result<&str, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != TOKEN_SEGMENTS {
            return Err(TokenError::Malformed(format!(
                "expected {} segments, got {}",
                TOKEN_SEGMENTS,
                segments.len()
            )));
        }
        Ok(segments[0])
    }

    fn check_signing_method(header_segment: &str) -> Result<(), TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|e| TokenError::Malformed(format!("header: {}", e)))?;
        let header: SegmentHeader = serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::Malformed(format!("header: {}", e)))?;

        if header.alg != SIGNING_METHOD_NAME {
            return Err(TokenError::InvalidSigningMethod(header.alg));
        }
        Ok(())
    }

    fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::InvalidSigningMethod(error.to_string())
            }
            _ => TokenError::Malformed(error.to_string()),
        }
    }
}
