//! Field Mapper: EmergencyProfile <-> CompactSchema
//!
//! Tanggal disimpan sebagai jumlah hari sejak 1970-01-01 (bukan timestamp
//! penuh). Free text dipotong di char boundary sehingga karakter multi-byte
//! tidak pernah terbelah.

use chrono::{Datelike, NaiveDate};

use super::{EmergencyProfile, Field};

/// Versi compact schema (dipatok oleh tag protokol SS1)
pub const SCHEMA_VERSION: u8 = 1;

/// Batas karakter untuk allergies, medications, conditions
pub const FREE_TEXT_MAX_CHARS: usize = 160;

/// `num_days_from_ce()` untuk 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Compact tuple dengan urutan tetap
///
/// Dua profile dengan nilai field yang sama selalu menghasilkan tuple yang
/// identik, sehingga hasil pack dan integrity tag deterministik.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactSchema {
    pub full_name: Option<String>,
    /// Hari sejak 1970-01-01 (negatif untuk tanggal sebelumnya)
    pub dob_days: Option<i32>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub conditions: Option<String>,
    pub emergency_name: Option<String>,
    pub emergency_relation: Option<String>,
    pub emergency_phone: Option<String>,
    pub wallet_address: Option<String>,
}

impl CompactSchema {
    /// Presence bitmap (bit i = slot i terisi)
    pub fn presence(&self) -> u16 {
        Field::ALL
            .iter()
            .filter(|f| self.is_present(**f))
            .fold(0u16, |bits, f| bits | f.bit())
    }

    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::DateOfBirth => self.dob_days.is_some(),
            other => self.text(other).is_some(),
        }
    }

    /// Text slot untuk field tertentu (`None` untuk DateOfBirth)
    pub fn text(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::FullName => &self.full_name,
            Field::DateOfBirth => return None,
            Field::Gender => &self.gender,
            Field::BloodGroup => &self.blood_group,
            Field::Allergies => &self.allergies,
            Field::Medications => &self.medications,
            Field::Conditions => &self.conditions,
            Field::EmergencyName => &self.emergency_name,
            Field::EmergencyRelation => &self.emergency_relation,
            Field::EmergencyPhone => &self.emergency_phone,
            Field::WalletAddress => &self.wallet_address,
        };
        slot.as_deref()
    }

    pub(crate) fn text_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::FullName => Some(&mut self.full_name),
            Field::DateOfBirth => None,
            Field::Gender => Some(&mut self.gender),
            Field::BloodGroup => Some(&mut self.blood_group),
            Field::Allergies => Some(&mut self.allergies),
            Field::Medications => Some(&mut self.medications),
            Field::Conditions => Some(&mut self.conditions),
            Field::EmergencyName => Some(&mut self.emergency_name),
            Field::EmergencyRelation => Some(&mut self.emergency_relation),
            Field::EmergencyPhone => Some(&mut self.emergency_phone),
            Field::WalletAddress => Some(&mut self.wallet_address),
        }
    }

    /// Potong text slot ke `max_chars` karakter
    ///
    /// Returns true jika slot benar-benar dipendekkan.
    pub(crate) fn shrink(&mut self, field: Field, max_chars: usize) -> bool {
        let Some(Some(value)) = self.text_mut(field) else {
            return false;
        };
        match truncate_chars(value, max_chars).map(str::to_string) {
            Some(cut) => {
                *value = cut;
                true
            }
            None => false,
        }
    }

    /// Jumlah karakter di text slot
    pub(crate) fn char_len(&self, field: Field) -> usize {
        self.text(field).map_or(0, |s| s.chars().count())
    }
}

/// Potong string ke maksimal `max_chars` karakter
///
/// Returns `None` jika string sudah cukup pendek.
pub fn truncate_chars(s: &str, max_chars: usize) -> Option<&str> {
    s.char_indices().nth(max_chars).map(|(idx, _)| &s[..idx])
}

/// Normalisasi input text: string kosong dianggap absent
fn normalize(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Mapping profile ke compact schema, beserta daftar field yang di-truncate
pub(crate) fn map_profile(profile: &EmergencyProfile) -> (CompactSchema, Vec<Field>) {
    let mut compact = CompactSchema {
        full_name: normalize(&profile.full_name),
        dob_days: profile.date_of_birth.map(date_to_days),
        gender: normalize(&profile.gender),
        blood_group: normalize(&profile.blood_group),
        allergies: normalize(&profile.allergies),
        medications: normalize(&profile.medications),
        conditions: normalize(&profile.conditions),
        emergency_name: normalize(&profile.emergency_name),
        emergency_relation: normalize(&profile.emergency_relation),
        emergency_phone: normalize(&profile.emergency_phone),
        wallet_address: normalize(&profile.wallet_address),
    };

    let truncated = Field::ALL
        .into_iter()
        .filter(|f| f.is_free_text())
        .filter(|f| compact.shrink(*f, FREE_TEXT_MAX_CHARS))
        .collect();

    (compact, truncated)
}

/// EmergencyProfile -> CompactSchema (truncation diam-diam, tidak pernah error)
pub fn to_compact(profile: &EmergencyProfile) -> CompactSchema {
    map_profile(profile).0
}

/// CompactSchema -> EmergencyProfile (tidak pernah panic)
pub fn from_compact(compact: &CompactSchema) -> EmergencyProfile {
    EmergencyProfile {
        full_name: compact.full_name.clone(),
        date_of_birth: compact.dob_days.and_then(days_to_date),
        gender: compact.gender.clone(),
        blood_group: compact.blood_group.clone(),
        allergies: compact.allergies.clone(),
        medications: compact.medications.clone(),
        conditions: compact.conditions.clone(),
        emergency_name: compact.emergency_name.clone(),
        emergency_relation: compact.emergency_relation.clone(),
        emergency_phone: compact.emergency_phone.clone(),
        wallet_address: compact.wallet_address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_day_count() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_days(epoch), 0);

        let dob = NaiveDate::from_ymd_opt(1965, 7, 3).unwrap();
        let days = date_to_days(dob);
        assert!(days < 0);
        assert_eq!(days_to_date(days), Some(dob));

        assert_eq!(days_to_date(i32::MAX), None);
    }

    #[test]
    fn test_empty_strings_become_absent() {
        let profile = EmergencyProfile {
            full_name: Some("".into()),
            gender: Some("".into()),
            allergies: Some("Latex".into()),
            ..Default::default()
        };
        let compact = to_compact(&profile);
        assert_eq!(compact.full_name, None);
        assert_eq!(compact.gender, None);
        assert_eq!(compact.allergies.as_deref(), Some("Latex"));
        assert_eq!(compact.presence(), Field::Allergies.bit());
    }

    #[test]
    fn test_literal_words_kept_verbatim() {
        let profile = EmergencyProfile {
            gender: Some("null".into()),
            conditions: Some("undefined".into()),
            ..Default::default()
        };
        assert_eq!(from_compact(&to_compact(&profile)), profile);
    }

    #[test]
    fn test_free_text_truncated_on_char_boundary() {
        // Devanagari: 3 bytes per karakter
        let long = "दवा".repeat(100);
        let profile = EmergencyProfile {
            medications: Some(long),
            full_name: Some("x".repeat(500)),
            ..Default::default()
        };
        let (compact, truncated) = map_profile(&profile);

        assert_eq!(truncated, vec![Field::Medications]);
        assert_eq!(compact.char_len(Field::Medications), FREE_TEXT_MAX_CHARS);
        // Nama bukan free text, tidak di-truncate
        assert_eq!(compact.char_len(Field::FullName), 500);
    }

    #[test]
    fn test_unicode_roundtrip() {
        let profile = EmergencyProfile {
            full_name: Some("আয়েশা খান".into()),
            emergency_relation: Some("भाई".into()),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 2, 28),
            ..Default::default()
        };
        assert_eq!(from_compact(&to_compact(&profile)), profile);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), None);
        assert_eq!(truncate_chars("hello", 5), None);
        assert_eq!(truncate_chars("hello", 2), Some("he"));
        assert_eq!(truncate_chars("ñandú", 2), Some("ña"));
    }
}
