//! Zero-Net - QR Emergency Profile Codec
//!
//! Arsitektur:
//! - Field Mapping: profile sparse -> compact schema dengan urutan tetap
//! - Binary Pack: presence bitmap + varint, deterministik
//! - Compression: raw deflate
//! - Framing: HMAC tag + base64url dengan prefix `SS1:`
//!
//! Decode berjalan offline, tanpa network dan tanpa server state.
//!
//! ```no_run
//! use zeronet::{CodecConfig, EmergencyProfile, ZeroNetCodec};
//!
//! let codec = ZeroNetCodec::new(CodecConfig::from_env()?)?;
//! let profile = EmergencyProfile {
//!     blood_group: Some("O+".into()),
//!     ..Default::default()
//! };
//! let token = codec.encode_emergency_profile(&profile)?;
//! assert_eq!(codec.decode_emergency_profile(&token)?, profile);
//! # Ok::<(), zeronet::CodecError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod link;
pub mod profile;
pub mod protocol;

pub use codec::{
    decode_emergency_profile, encode_emergency_profile, EncodedProfile, TokenInfo, ZeroNetCodec,
};
pub use config::{CodecConfig, Secret};
pub use error::{CodecError, Result};
pub use link::{emergency_url, token_from_url};
pub use profile::{EmergencyProfile, Field};
