//! Zero-Net Codec: pipeline encode/decode lengkap
//!
//! ```text
//! EmergencyProfile -> CompactSchema -> pack -> deflate -> tag + base64url -> "SS1:..."
//! ```
//!
//! Semua operasi pure dan stateless. `ZeroNetCodec` immutable setelah
//! konstruksi sehingga aman di-share antar request handler (`Arc`).

use serde::Serialize;

use crate::config::CodecConfig;
use crate::error::Result;
use crate::profile::{from_compact, map_profile, CompactSchema, EmergencyProfile, Field};
use crate::protocol::{compress, decompress, unpack, Framer, Packer, PROTOCOL_TAG};

/// Batas bawah saat free text prioritas rendah di-shrink demi budget
pub const SHRINK_FLOOR_CHARS: usize = 24;

/// Urutan shrink: prioritas paling rendah duluan. Field keselamatan
/// (blood group, allergies, emergency contact) tidak pernah masuk sini.
const SHRINK_ORDER: [Field; 2] = [Field::Conditions, Field::Medications];

/// Hasil encode beserta detail untuk profile owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedProfile {
    pub token: String,
    /// Field yang dipendekkan (static cap atau shrink budget)
    pub truncated: Vec<Field>,
    pub packed_len: usize,
    pub compressed_len: usize,
}

/// Statistik token hasil verifikasi
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub protocol: &'static str,
    pub token_len: usize,
    pub compressed_len: usize,
    pub packed_len: usize,
    /// Short code dari field yang present
    pub fields: Vec<&'static str>,
}

/// Codec dengan secret yang sudah di-inject
#[derive(Debug, Clone)]
pub struct ZeroNetCodec {
    framer: Framer,
}

impl ZeroNetCodec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        Ok(Self {
            framer: Framer::new(config.secret)?,
        })
    }

    /// EmergencyProfile -> token `SS1:...`
    pub fn encode_emergency_profile(&self, profile: &EmergencyProfile) -> Result<String> {
        self.encode_with_report(profile).map(|encoded| encoded.token)
    }

    /// Encode dengan report truncation dan ukuran tiap stage
    pub fn encode_with_report(&self, profile: &EmergencyProfile) -> Result<EncodedProfile> {
        let (mut compact, mut truncated) = map_profile(profile);
        let mut packer = Packer::default();

        loop {
            let attempt = packer.pack(&compact).and_then(|packed| {
                let compressed = compress(packed)?;
                let token = self.framer.frame(&compressed)?;
                Ok((packed.len(), compressed.len(), token))
            });

            match attempt {
                Ok((packed_len, compressed_len, token)) => {
                    tracing::debug!(
                        packed_len,
                        compressed_len,
                        token_len = token.len(),
                        truncated = truncated.len(),
                        "encoded emergency profile"
                    );
                    return Ok(EncodedProfile {
                        token,
                        truncated,
                        packed_len,
                        compressed_len,
                    });
                }
                Err(err) if err.is_size_error() => match shrink_step(&mut compact) {
                    Some(field) => {
                        tracing::debug!(field = field.code(), "shrinking free text to fit budget");
                        if !truncated.contains(&field) {
                            truncated.push(field);
                        }
                    }
                    None => {
                        tracing::debug!(error = %err, "profile does not fit after truncation");
                        return Err(err);
                    }
                },
                Err(err) => return Err(err),
            }
        }
    }

    /// Token -> EmergencyProfile
    pub fn decode_emergency_profile(&self, token: &str) -> Result<EmergencyProfile> {
        let (compact, _, _) = self.open(token)?;
        Ok(from_compact(&compact))
    }

    /// Verifikasi token dan laporkan statistiknya
    pub fn inspect(&self, token: &str) -> Result<TokenInfo> {
        let (compact, compressed_len, packed_len) = self.open(token)?;
        Ok(TokenInfo {
            protocol: PROTOCOL_TAG,
            token_len: token.len(),
            compressed_len,
            packed_len,
            fields: Field::ALL
                .into_iter()
                .filter(|f| compact.is_present(*f))
                .map(Field::code)
                .collect(),
        })
    }

    fn open(&self, token: &str) -> Result<(CompactSchema, usize, usize)> {
        let compressed = self.framer.unframe(token)?;
        let packed = decompress(&compressed)?;
        let compact = unpack(&packed)?;
        tracing::debug!(
            compressed_len = compressed.len(),
            packed_len = packed.len(),
            "decoded emergency profile"
        );
        Ok((compact, compressed.len(), packed.len()))
    }
}

/// Shrink satu langkah pada field prioritas terendah yang masih bisa dipotong
fn shrink_step(compact: &mut CompactSchema) -> Option<Field> {
    SHRINK_ORDER
        .into_iter()
        .filter(|field| !field.is_safety_critical())
        .find(|field| {
            let len = compact.char_len(*field);
            len > SHRINK_FLOOR_CHARS && compact.shrink(*field, (len / 2).max(SHRINK_FLOOR_CHARS))
        })
}

/// One-shot encode
pub fn encode_emergency_profile(profile: &EmergencyProfile, config: &CodecConfig) -> Result<String> {
    ZeroNetCodec::new(config.clone())?.encode_emergency_profile(profile)
}

/// One-shot decode
pub fn decode_emergency_profile(token: &str, config: &CodecConfig) -> Result<EmergencyProfile> {
    ZeroNetCodec::new(config.clone())?.decode_emergency_profile(token)
}
