//! Konfigurasi codec
//!
//! Secret integrity di-load sekali saat startup lalu immutable selama
//! lifetime proses. Tidak ada singleton: config di-inject ke codec.

use std::fmt;

use crate::error::{CodecError, Result};

/// Environment variable untuk secret integrity tag
pub const SECRET_ENV: &str = "ZERONET_SECRET";

/// Panjang minimum secret dalam bytes
pub const MIN_SECRET_LEN: usize = 16;

/// Shared secret untuk HMAC tag
///
/// `Debug` tidak pernah menampilkan isi secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(CodecError::Config(format!(
                "secret must be at least {} bytes, got {}",
                MIN_SECRET_LEN,
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

/// Codec configuration
#[derive(Debug, Clone)]
pub struct CodecConfig {
    pub secret: Secret,
}

impl CodecConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self {
            secret: Secret::new(secret)?,
        })
    }

    /// Load config dari environment (`ZERONET_SECRET`)
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(SECRET_ENV)
            .map_err(|_| CodecError::Config(format!("{} is not set", SECRET_ENV)))?;
        Self::new(value.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let err = CodecConfig::new("too-short").unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_secret_redacted() {
        let config = CodecConfig::new("0123456789abcdef-test").unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("0123456789abcdef"));
        assert!(printed.contains("REDACTED"));
    }
}
