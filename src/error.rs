//! Error taxonomy untuk codec Zero-Net
//!
//! Semua error decode bersifat recoverable: caller cukup menampilkan
//! "invalid/corrupted emergency code" ke user yang melakukan scan.

/// Error yang bisa muncul di jalur encode maupun decode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Packed buffer melebihi budget sebelum kompresi
    #[error("Encoded profile too large: {size} bytes (max {max})")]
    Encode { size: usize, max: usize },

    /// Token akhir melebihi batas panjang QR/URL
    #[error("Token too large: {len} chars (max {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Unsupported protocol: expected SS1 token")]
    UnsupportedProtocol,

    #[error("Corrupt payload: {0}")]
    CorruptPayload(&'static str),

    #[error("Integrity check failed")]
    Integrity,

    /// Kegagalan internal deflate writer (bukan masalah ukuran)
    #[error("Compression failed: {0}")]
    Compress(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CodecError {
    /// True untuk error yang berasal dari token hasil scan (bukan dari encoder)
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProtocol | Self::CorruptPayload(_) | Self::Integrity
        )
    }

    /// True jika profile owner perlu memperpendek free-text field
    pub fn is_size_error(&self) -> bool {
        matches!(self, Self::Encode { .. } | Self::PayloadTooLarge { .. })
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(CodecError::Integrity.is_decode_error());
        assert!(CodecError::CorruptPayload("x").is_decode_error());
        assert!(!CodecError::Integrity.is_size_error());

        let err = CodecError::PayloadTooLarge { len: 2000, max: 1024 };
        assert!(err.is_size_error());
        assert!(!err.is_decode_error());
        assert_eq!(err.to_string(), "Token too large: 2000 chars (max 1024)");

        let err = CodecError::Compress("broken pipe".into());
        assert!(!err.is_size_error());
        assert!(!err.is_decode_error());
    }
}
