//! SS1 Wire Format
//!
//! Layout token:
//! ┌─────────────────────────────────────────────────────┐
//! │ "SS1:" prefix (protocol + version tag)              │
//! ├─────────────────────────────────────────────────────┤
//! │ base64url( tag[16] || deflate(packed) )             │
//! └─────────────────────────────────────────────────────┘
//!
//! Layout packed (sebelum kompresi):
//! ┌─────────────────────────────────────────────────────┐
//! │ schema version u8 │ presence bitmap u16 LE          │
//! ├─────────────────────────────────────────────────────┤
//! │ slot yang present, urutan tetap (text = LEB128 len  │
//! │ + UTF-8, tanggal = zigzag LEB128, blood = u8 code)  │
//! └─────────────────────────────────────────────────────┘
//!
//! Semua konstanta di sini adalah kontrak durable: token SS1 yang sudah
//! dicetak harus tetap bisa di-decode.

/// Protocol + version tag
pub const PROTOCOL_TAG: &str = "SS1";

/// Prefix token lengkap dengan separator
pub const TOKEN_PREFIX: &str = "SS1:";

/// Lebar integrity tag (HMAC-SHA256 truncated)
pub const TAG_LEN: usize = 16;

/// Budget packed buffer sebelum kompresi
pub const MAX_PACKED_SIZE: usize = 2048;

/// Batas panjang token (QR low-EC + URL ceiling)
pub const MAX_TOKEN_LEN: usize = 1024;

/// Header packed: version + presence bitmap
pub const PACKED_HEADER_SIZE: usize = 3;

/// Mask bit presence yang valid (11 slot)
pub const PRESENCE_MASK: u16 = (1 << 11) - 1;

/// Blood code 0 = literal text menyusul
pub const BLOOD_LITERAL: u8 = 0;

/// Golongan darah yang punya kode 1 byte (code = index + 1)
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Kode 1 byte untuk golongan darah, jika dikenal (exact match)
#[inline(always)]
pub fn blood_code(value: &str) -> Option<u8> {
    BLOOD_GROUPS
        .iter()
        .position(|g| *g == value)
        .map(|idx| idx as u8 + 1)
}

/// Kebalikan `blood_code`
#[inline(always)]
pub fn blood_from_code(code: u8) -> Option<&'static str> {
    (code as usize)
        .checked_sub(1)
        .and_then(|idx| BLOOD_GROUPS.get(idx))
        .copied()
}
