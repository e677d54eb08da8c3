//! Checkout callback signatures
//!
//! Razorpay signs a completed payment as
//! `hex(HMAC-SHA256(key_secret, order_id + "|" + payment_id))`. The merchant
//! backend recomputes that value and compares it with the one the browser
//! forwarded.

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors raised while computing a signature
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The secret could not be used as an HMAC key
    #[error("Invalid signing key")]
    InvalidKey(#[from] hmac::digest::InvalidLength),
}

/// Gateway key secret
///
/// Held in memory only. `Debug` never prints the value.
#[derive(Clone)]
pub struct KeySecret(Arc<str>);

impl KeySecret {
    /// Wrap a secret value
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    /// Borrow the raw secret
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compute the signature Razorpay would attach to this payment
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidKey`] if the secret is rejected as an
    /// HMAC key.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(self.0.as_bytes())?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a forwarded signature in constant time
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidKey`] if the secret is rejected as an
    /// HMAC key.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, SignatureError> {
        let expected = self.sign(order_id, payment_id)?;
        Ok(constant_time_eq(expected.as_bytes(), signature.as_bytes()))
    }
}

impl fmt::Debug for KeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeySecret(<redacted>)")
    }
}
