//! Binary Packer: CompactSchema <-> dense byte buffer
//!
//! Encode langsung ke pre-allocated buffer dengan budget tetap.
//! Output deterministik: slot ditulis dalam urutan schema, tidak ada
//! map/key ordering.

use super::wire::{
    blood_code, blood_from_code, BLOOD_LITERAL, MAX_PACKED_SIZE, PACKED_HEADER_SIZE,
    PRESENCE_MASK,
};
use crate::error::{CodecError, Result};
use crate::profile::{CompactSchema, Field, SCHEMA_VERSION};

/// Maksimal byte untuk LEB128 u32
const MAX_VARINT_LEN: usize = 5;

/// Pre-allocated packer buffer
///
/// Write yang melewati budget tidak menulis apa-apa, tapi tetap dihitung
/// supaya error bisa melaporkan ukuran sebenarnya.
pub struct Packer {
    buffer: Box<[u8]>,
    write_pos: usize,
    needed: usize,
}

impl Packer {
    /// Membuat packer dengan budget tertentu
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            write_pos: 0,
            needed: 0,
        }
    }

    /// Reset packer untuk reuse
    #[inline(always)]
    pub fn reset(&mut self) {
        self.write_pos = 0;
        self.needed = 0;
    }

    #[inline(always)]
    fn put(&mut self, bytes: &[u8]) {
        self.needed += bytes.len();
        if self.needed <= self.buffer.len() {
            self.buffer[self.write_pos..self.needed].copy_from_slice(bytes);
            self.write_pos = self.needed;
        }
    }

    #[inline(always)]
    fn put_varint(&mut self, mut value: u32) {
        let mut tmp = [0u8; MAX_VARINT_LEN];
        let mut len = 0;
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                tmp[len] = byte;
                len += 1;
                break;
            }
            tmp[len] = byte | 0x80;
            len += 1;
        }
        self.put(&tmp[..len]);
    }

    #[inline(always)]
    fn put_text(&mut self, text: &str) {
        // Text lebih dari u32::MAX pasti melewati budget
        let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        self.put_varint(len);
        self.put(text.as_bytes());
    }

    /// Encode compact tuple ke buffer
    ///
    /// Returns slice ke packed data, atau `CodecError::Encode` jika melebihi budget.
    pub fn pack(&mut self, compact: &CompactSchema) -> Result<&[u8]> {
        self.reset();

        self.put(&[SCHEMA_VERSION]);
        self.put(&compact.presence().to_le_bytes());

        for field in Field::ALL {
            match field {
                Field::DateOfBirth => {
                    if let Some(days) = compact.dob_days {
                        self.put_varint(zigzag(days));
                    }
                }
                Field::BloodGroup => {
                    if let Some(group) = compact.text(field) {
                        match blood_code(group) {
                            Some(code) => self.put(&[code]),
                            None => {
                                self.put(&[BLOOD_LITERAL]);
                                self.put_text(group);
                            }
                        }
                    }
                }
                _ => {
                    if let Some(text) = compact.text(field) {
                        self.put_text(text);
                    }
                }
            }
        }

        if self.needed > self.buffer.len() {
            return Err(CodecError::Encode {
                size: self.needed,
                max: self.buffer.len(),
            });
        }

        Ok(&self.buffer[..self.write_pos])
    }
}

impl Default for Packer {
    fn default() -> Self {
        Self::new(MAX_PACKED_SIZE)
    }
}

/// Pack dengan budget default
pub fn pack(compact: &CompactSchema) -> Result<Vec<u8>> {
    Packer::default().pack(compact).map(<[u8]>::to_vec)
}

/// Decoder untuk packed buffer
pub struct Unpacker<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> Unpacker<'a> {
    #[inline(always)]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    #[inline(always)]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .read_pos
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or(CodecError::CorruptPayload("truncated packed data"))?;
        let bytes = &self.buffer[self.read_pos..end];
        self.read_pos = end;
        Ok(bytes)
    }

    #[inline(always)]
    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_varint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.take_u8()?;
            let chunk = (byte & 0x7F) as u32;
            // Byte ke-5 hanya boleh membawa 4 bit
            if i == MAX_VARINT_LEN - 1 && chunk > 0x0F {
                return Err(CodecError::CorruptPayload("varint overflow"));
            }
            value |= chunk << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::CorruptPayload("varint too long"))
    }

    fn take_text(&mut self) -> Result<String> {
        let len = self.take_varint()? as usize;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| CodecError::CorruptPayload("invalid utf-8 text"))
    }

    /// Decode seluruh buffer menjadi compact tuple
    pub fn unpack(&mut self) -> Result<CompactSchema> {
        if self.buffer.len() < PACKED_HEADER_SIZE {
            return Err(CodecError::CorruptPayload("packed header too short"));
        }

        if self.take_u8()? != SCHEMA_VERSION {
            return Err(CodecError::CorruptPayload("unknown schema version"));
        }

        let header = self.take(2)?;
        let presence = u16::from_le_bytes([header[0], header[1]]);
        if presence & !PRESENCE_MASK != 0 {
            return Err(CodecError::CorruptPayload("unknown presence bits"));
        }

        let mut compact = CompactSchema::default();

        for field in Field::ALL {
            if presence & field.bit() == 0 {
                continue;
            }
            match field {
                Field::DateOfBirth => {
                    compact.dob_days = Some(unzigzag(self.take_varint()?));
                }
                Field::BloodGroup => {
                    let value = match self.take_u8()? {
                        BLOOD_LITERAL => self.take_text()?,
                        code => blood_from_code(code)
                            .ok_or(CodecError::CorruptPayload("unknown blood code"))?
                            .to_string(),
                    };
                    compact.blood_group = Some(value);
                }
                _ => {
                    let value = self.take_text()?;
                    if let Some(slot) = compact.text_mut(field) {
                        *slot = Some(value);
                    }
                }
            }
        }

        if self.remaining() != 0 {
            return Err(CodecError::CorruptPayload("trailing bytes"));
        }

        Ok(compact)
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }
}

/// Unpack buffer lengkap
pub fn unpack(buffer: &[u8]) -> Result<CompactSchema> {
    Unpacker::new(buffer).unpack()
}

#[inline(always)]
fn zigzag(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

#[inline(always)]
fn unzigzag(v: u32) -> i32 {
    ((v >> 1) as i32) ^ -((v & 1) as i32)
}
