// ---------------------------------------------------------------------------
// file_header – Save file header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "DUSK"
//   [4..8]   Header format version (u32)
//   [8..12]  Flags (u32, reserved, always 0)
//   [12..20] Timestamp (Unix epoch seconds, u64)
//   [20..24] Payload size (u32)
//   [24..28] xxHash32 checksum of the payload (everything after the header)

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a save file.
pub const MAGIC: [u8; 4] = *b"DUSK";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Layout version of the header itself, independent of `SaveData::version`.
pub const HEADER_FORMAT_VERSION: u32 = 1;

const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub payload_size: u32,
    pub checksum: u32,
}

/// Payload length as stored in the header; payloads of 4 GiB or more do not fit.
fn payload_size(len: usize) -> Result<u32, SaveError> {
    u32::try_from(len).map_err(|_| {
        SaveError::Header(format!(
            "payload is {len} bytes, larger than the {} byte header limit",
            u32::MAX
        ))
    })
}

impl FileHeader {
    pub fn new(payload: &[u8]) -> Result<Self, SaveError> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(Self {
            format_version: HEADER_FORMAT_VERSION,
            flags: 0,
            timestamp,
            payload_size: payload_size(payload.len())?,
            checksum: xxh32(payload, XXHASH_SEED),
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.format_version.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.payload_size.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
    }
}

/// Returns `[header] ++ [payload]`.
pub fn wrap_with_header(payload: &[u8]) -> Result<Vec<u8>, SaveError> {
    let header = FileHeader::new(payload)?;
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut out);
    out.extend_from_slice(payload);
    Ok(out)
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn le_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}

/// Validate the header and return it together with the payload.
///
/// Rejects files without the magic bytes, truncated headers, headers from a
/// newer build, size mismatches and checksum mismatches.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
        return Err(SaveError::Header("not a save file (missing DUSK magic)".into()));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Header(format!(
            "file too short ({} bytes, need at least {HEADER_SIZE} for header)",
            bytes.len()
        )));
    }

    let header = FileHeader {
        format_version: le_u32(bytes, 4),
        flags: le_u32(bytes, 8),
        timestamp: le_u64(bytes, 12),
        payload_size: le_u32(bytes, 20),
        checksum: le_u32(bytes, 24),
    };

    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::Header(format!(
            "header format version {} is newer than supported version {HEADER_FORMAT_VERSION}",
            header.format_version
        )));
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != header.payload_size as usize {
        return Err(SaveError::Header(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            header.payload_size
        )));
    }

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Header(format!(
            "checksum mismatch (expected {:#010X}, got {computed:#010X}); the file is corrupted",
            header.checksum
        )));
    }

    Ok((header, payload))
}
