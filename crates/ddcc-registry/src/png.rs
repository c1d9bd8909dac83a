//! Minimal PNG header reading: dimensions and content hash.
//!
//! No chunk walking. The IHDR chunk must be the first chunk, which the
//! format requires of every conforming file; its width and height sit at
//! fixed offsets 16 and 20.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const IHDR_TYPE: &[u8; 4] = b"IHDR";
const IHDR_TYPE_OFFSET: usize = 12;
const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;
const MIN_HEADER_LEN: usize = 24;

/// Header facts extracted from one PNG file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngMeta {
    pub width: u32,
    pub height: u32,
    /// Lowercase hex SHA-256 of the whole file.
    pub sha256: String,
}

/// Read `path` fully and extract its header facts.
///
/// `Ok(None)` means the file is not a PNG we can read metadata from.
pub fn read_png_meta(path: impl AsRef<Path>) -> std::io::Result<Option<PngMeta>> {
    let bytes = fs::read(path)?;
    Ok(png_meta_from_bytes(&bytes))
}

pub fn png_meta_from_bytes(bytes: &[u8]) -> Option<PngMeta> {
    if bytes.len() < MIN_HEADER_LEN || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return None;
    }
    if &bytes[IHDR_TYPE_OFFSET..WIDTH_OFFSET] != IHDR_TYPE {
        return None;
    }
    let hash = Sha256::digest(bytes);
    Some(PngMeta {
        width: read_u32_be(bytes, WIDTH_OFFSET)?,
        height: read_u32_be(bytes, HEIGHT_OFFSET)?,
        sha256: format!("{hash:x}"),
    })
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}


#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn reads_dimensions_and_whole_file_hash() {
        let bytes = png_bytes(128, 64);
        let meta = png_meta_from_bytes(&bytes).expect("valid header should parse");
        assert_eq!(meta.width, 128);
        assert_eq!(meta.height, 64);
        assert_eq!(meta.sha256, format!("{:x}", Sha256::digest(&bytes)));
        assert_eq!(meta.sha256.len(), 64);
    }

    #[test]
    fn rejects_wrong_signature() {
        let mut bytes = png_bytes(128, 64);
        bytes[1] = b'Q';
        assert_eq!(png_meta_from_bytes(&bytes), None);
        assert_eq!(png_meta_from_bytes(b"GIF89a"), None);
    }

    #[test]
    fn rejects_truncated_header_and_non_ihdr_first_chunk() {
        let bytes = png_bytes(128, 64);
        assert_eq!(png_meta_from_bytes(&bytes[..20]), None);

        let mut swapped = bytes.clone();
        swapped[IHDR_TYPE_OFFSET..WIDTH_OFFSET].copy_from_slice(b"tEXt");
        assert_eq!(png_meta_from_bytes(&swapped), None);
    }

    #[test]
    fn hash_covers_trailing_bytes() {
        let plain = png_bytes(64, 64);
        let mut padded = plain.clone();
        padded.push(0);
        let a = png_meta_from_bytes(&plain).expect("plain should parse");
        let b = png_meta_from_bytes(&padded).expect("padded should parse");
        assert_eq!((a.width, a.height), (b.width, b.height));
        assert_ne!(a.sha256, b.sha256);
    }
}
