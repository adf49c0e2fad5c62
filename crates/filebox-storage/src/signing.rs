//! HMAC-SHA256 signatures for local storage URLs.
//!
//! Signature = hex(HMAC-SHA256(secret, "{storage_key}\n{expires}")), where
//! `expires` is a unix timestamp in seconds.

use crate::traits::{StorageError, StorageResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub(crate) struct UrlSigner {
    secret: Vec<u8>,
}

impl UrlSigner {
    pub(crate) fn new(secret: impl Into<Vec<u8>>) -> Self {
        UrlSigner {
            secret: secret.into(),
        }
    }

    fn mac(&self, storage_key: &str, expires: u64) -> StorageResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;
        mac.update(storage_key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }

    pub(crate) fn sign(&self, storage_key: &str, expires: u64) -> StorageResult<String> {
        let tag = self.mac(storage_key, expires)?.finalize().into_bytes();
        Ok(hex::encode(tag))
    }

    /// Check the signature first, then the expiry, against `now`.
    pub(crate) fn verify(
        &self,
        storage_key: &str,
        expires: u64,
        signature: &str,
        now: u64,
    ) -> StorageResult<()> {
        let tag = hex::decode(signature).map_err(|_| StorageError::InvalidSignature)?;
        self.mac(storage_key, expires)?
            .verify_slice(&tag)
            .map_err(|_| StorageError::InvalidSignature)?;

        if now > expires {
            return Err(StorageError::Expired);
        }
        Ok(())
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
