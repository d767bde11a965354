//! Profile Layer: Emergency profile dan compact schema
//!
//! Prinsip desain:
//! - Explicit presence: setiap field adalah `Option`, tidak ada "missing key"
//! - Fixed order: urutan slot dipatok oleh schema version
//! - Bounded: free text di-truncate diam-diam agar token muat di QR

mod compact;

pub use compact::{
    from_compact, to_compact, truncate_chars, CompactSchema, FREE_TEXT_MAX_CHARS, SCHEMA_VERSION,
};
pub(crate) use compact::map_profile;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data darurat pasien (input encode, output decode)
///
/// JSON memakai camelCase agar cocok dengan profile storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl EmergencyProfile {
    /// True jika tidak ada satupun field yang terisi
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Slot dalam compact schema, urutan enum = urutan wire
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    FullName = 0,
    DateOfBirth = 1,
    Gender = 2,
    BloodGroup = 3,
    Allergies = 4,
    Medications = 5,
    Conditions = 6,
    EmergencyName = 7,
    EmergencyRelation = 8,
    EmergencyPhone = 9,
    WalletAddress = 10,
}

impl Field {
    /// Semua slot dalam urutan wire
    pub const ALL: [Field; 11] = [
        Field::FullName,
        Field::DateOfBirth,
        Field::Gender,
        Field::BloodGroup,
        Field::Allergies,
        Field::Medications,
        Field::Conditions,
        Field::EmergencyName,
        Field::EmergencyRelation,
        Field::EmergencyPhone,
        Field::WalletAddress,
    ];

    /// Short field code (dipakai di report dan inspect)
    pub fn code(self) -> &'static str {
        match self {
            Self::FullName => "n",
            Self::DateOfBirth => "d",
            Self::Gender => "g",
            Self::BloodGroup => "b",
            Self::Allergies => "a",
            Self::Medications => "m",
            Self::Conditions => "c",
            Self::EmergencyName => "en",
            Self::EmergencyRelation => "er",
            Self::EmergencyPhone => "ep",
            Self::WalletAddress => "w",
        }
    }

    /// Bit dalam presence bitmap
    #[inline(always)]
    pub fn bit(self) -> u16 {
        1 << (self as u8)
    }

    /// Free text yang boleh di-truncate
    pub fn is_free_text(self) -> bool {
        matches!(self, Self::Allergies | Self::Medications | Self::Conditions)
    }

    /// Field keselamatan: tidak pernah di-drop atau di-shrink demi budget
    pub fn is_safety_critical(self) -> bool {
        matches!(
            self,
            Self::BloodGroup
                | Self::Allergies
                | Self::EmergencyName
                | Self::EmergencyRelation
                | Self::EmergencyPhone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matches_discriminant() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(*field as usize, i);
            assert_eq!(field.bit(), 1u16 << i);
        }
    }

    #[test]
    fn test_profile_json_camel_case() {
        let json = r#"{"fullName":"Aisha Khan","bloodGroup":"O+","dateOfBirth":"1990-04-12"}"#;
        let profile: EmergencyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Aisha Khan"));
        assert_eq!(profile.blood_group.as_deref(), Some("O+"));
        assert_eq!(
            profile.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 4, 12)
        );

        // Field kosong tidak ikut di-serialize
        let out = serde_json::to_string(&profile).unwrap();
        assert!(!out.contains("allergies"));
        assert!(!out.contains("null"));
    }

    #[test]
    fn test_empty_profile() {
        let profile: EmergencyProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());
    }
}
