//! Reader for logic processor program payloads.
//!
//! The host hands programs over already inflated, in this layout (all
//! integers big-endian):
//!
//! ```text
//! u8   version            (must be 1)
//! i32  code length
//! [u8] code               (UTF-8)
//! i32  link count
//! per link:
//!   u16  name length
//!   [u8] name             (UTF-8)
//!   i16  dx               (relative to the processor anchor)
//!   i16  dy
//! ```

use warden_types::TilePos;

use crate::error::DecodeError;

/// The only payload version this reader understands.
pub const PROGRAM_VERSION: u8 = 1;

/// Largest program the host accepts, in bytes.
pub const MAX_CODE_BYTES: usize = 1024 * 100;

/// A decoded logic program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicProgram {
    /// Program source.
    pub code: String,
    /// Named links with offsets relative to the processor anchor.
    pub links: Vec<(String, TilePos)>,
}

/// Parse a program payload.
pub fn parse_program(bytes: &[u8]) -> Result<LogicProgram, DecodeError> {
    let mut reader = ByteReader::new(bytes);

    let version = reader.u8()?;
    if version != PROGRAM_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let code_len = reader.length()?;
    if code_len > MAX_CODE_BYTES {
        return Err(DecodeError::CodeTooLong {
            len: code_len,
            max: MAX_CODE_BYTES,
        });
    }
    let code = reader.utf8(code_len)?.to_owned();

    let link_count = reader.length()?;
    let mut links = Vec::new();
    for _ in 0..link_count {
        let name_len = usize::from(reader.u16()?);
        let name = reader.utf8(name_len)?.to_owned();
        let dx = i32::from(reader.i16()?);
        let dy = i32::from(reader.i16()?);
        links.push((name, TilePos::new(dx, dy)));
    }

    Ok(LogicProgram { code, links })
}

/// Cursor over a byte slice that reports truncation instead of panicking.
struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.offset;
        let slice = start
            .checked_add(needed)
            .and_then(|end| self.bytes.get(start..end))
            .ok_or(DecodeError::Truncated {
                needed,
                offset: start,
            })?;
        self.offset = start.saturating_add(needed);
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.array::<1>()?;
        Ok(byte)
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_be_bytes(self.array()?))
    }

    /// A non-negative `i32` length prefix.
    fn length(&mut self) -> Result<usize, DecodeError> {
        let raw = i32::from_be_bytes(self.array()?);
        usize::try_from(raw).ok().ok_or(DecodeError::NegativeLength(raw))
    }

    fn utf8(&mut self, len: usize) -> Result<&'a str, DecodeError> {
        Ok(std::str::from_utf8(self.take(len)?)?)
    }
}
