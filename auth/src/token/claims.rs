use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// The field set is fixed: a token vouches for a subject within the
/// `[iat, exp)` window and nothing else. New claims are added as named
/// fields so validation stays exhaustive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimSet {
    /// Subject (the identity the token vouches for)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds, UTC)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds, UTC)
    pub exp: i64,
}

impl ClaimSet {
    /// Create claims for a subject that expire `ttl` after now.
    ///
    /// # Arguments
    /// * `subject` - Identity the token vouches for
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with `iat = now` and `exp = now + ttl`
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();
        Self::issued_at(subject, now.timestamp(), (now + ttl).timestamp())
    }

    /// Create claims with an explicit issue time.
    ///
    /// For callers that keep their own clock.
    pub fn issued_at(subject: impl ToString, iat: i64, exp: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat,
            exp,
        }
    }

    /// Check if the claims were issued after `current_timestamp`.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
