//! Protocol Layer: SS1 binary pack, compression, dan framing
//!
//! Prinsip desain:
//! - Deterministic: tuple yang sama selalu menghasilkan byte yang sama
//! - Bounded: budget ukuran dicek sebelum dan sesudah kompresi
//! - Offline: decode tidak butuh network maupun server state

mod compress;
mod framer;
mod packer;
mod wire;

pub use compress::{compress, decompress};
pub use framer::Framer;
pub use packer::{pack, unpack, Packer, Unpacker};
pub use wire::{
    MAX_PACKED_SIZE, MAX_TOKEN_LEN, PROTOCOL_TAG, TAG_LEN, TOKEN_PREFIX,
};
