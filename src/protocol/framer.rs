//! Framer: integrity tag + URL-safe framing
//!
//! Tag adalah HMAC-SHA256 (truncated ke `TAG_LEN`) atas compressed bytes.
//! Secret dipakai bersama dan fixed, jadi tag hanya melindungi dari tampering
//! kasual pada QR yang hilang/difoto, bukan dari pemegang secret.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::wire::{MAX_TOKEN_LEN, TAG_LEN, TOKEN_PREFIX};
use crate::config::Secret;
use crate::error::{CodecError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Framer dengan secret yang di-inject saat konstruksi
///
/// Key HMAC di-derive sekali; tiap operasi memakai clone dari state itu.
#[derive(Clone)]
pub struct Framer {
    keyed: HmacSha256,
}

impl fmt::Debug for Framer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Framer([REDACTED])")
    }
}

impl Framer {
    pub fn new(secret: Secret) -> Result<Self> {
        let keyed = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
            .map_err(|_| CodecError::Config("secret rejected as HMAC key".to_string()))?;
        Ok(Self { keyed })
    }

    /// Hitung integrity tag untuk payload
    pub fn tag(&self, payload: &[u8]) -> [u8; TAG_LEN] {
        let mut mac = self.keyed.clone();
        mac.update(payload);
        let digest = mac.finalize().into_bytes();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&digest[..TAG_LEN]);
        tag
    }

    /// Panjang token untuk compressed payload berukuran `len`
    #[inline(always)]
    pub fn token_len(len: usize) -> usize {
        TOKEN_PREFIX.len() + base64::encoded_len(TAG_LEN + len, false).unwrap_or(usize::MAX)
    }

    /// compressed bytes -> `SS1:<base64url(tag || payload)>`
    pub fn frame(&self, compressed: &[u8]) -> Result<String> {
        let len = Self::token_len(compressed.len());
        if len > MAX_TOKEN_LEN {
            return Err(CodecError::PayloadTooLarge {
                len,
                max: MAX_TOKEN_LEN,
            });
        }

        let mut framed = Vec::with_capacity(TAG_LEN + compressed.len());
        framed.extend_from_slice(&self.tag(compressed));
        framed.extend_from_slice(compressed);

        let mut token = String::with_capacity(len);
        token.push_str(TOKEN_PREFIX);
        URL_SAFE_NO_PAD.encode_string(&framed, &mut token);
        Ok(token)
    }

    /// `SS1:` token -> compressed bytes (tag sudah diverifikasi)
    pub fn unframe(&self, token: &str) -> Result<Vec<u8>> {
        let Some(body) = token.strip_prefix(TOKEN_PREFIX) else {
            tracing::warn!("rejected token with unsupported protocol prefix");
            return Err(CodecError::UnsupportedProtocol);
        };

        // Token hasil scan yang kepanjangan = kode rusak, bukan urusan owner
        if token.len() > MAX_TOKEN_LEN {
            return Err(CodecError::CorruptPayload("token exceeds SS1 ceiling"));
        }

        let framed = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| CodecError::CorruptPayload("invalid base64url"))?;

        if framed.len() < TAG_LEN {
            return Err(CodecError::CorruptPayload("payload shorter than tag"));
        }

        let (tag, payload) = framed.split_at(TAG_LEN);

        // Constant-time compare
        let mut mac = self.keyed.clone();
        mac.update(payload);
        if mac.verify_truncated_left(tag).is_err() {
            tracing::warn!(payload_len = payload.len(), "integrity tag mismatch");
            return Err(CodecError::Integrity);
        }

        Ok(payload.to_vec())
    }
}
