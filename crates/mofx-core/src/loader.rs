//! Loading MOF documents from disk
//!
//! DSC tooling writes MOF files as UTF-16 LE with a BOM as often as UTF-8,
//! so the text encoding is sniffed from the byte-order mark before parsing.

use crate::errors::{MofxError, Result};
use crate::model::Document;
use crate::parser::parse_str;
use crate::{log_op_end, log_op_error, log_op_start};
use std::path::Path;
use std::time::Instant;

/// Read, decode, parse and aggregate one document.
///
/// # Errors
///
/// - `DocumentNotFound` if `path` does not exist (checked before reading)
/// - `Io` if the file exists but cannot be read
pub fn load_document(path: &Path) -> Result<Document> {
    let start = Instant::now();
    log_op_start!("load_document", path = %path.display());

    match read_document(path) {
        Ok(doc) => {
            log_op_end!(
                "load_document",
                duration_ms = start.elapsed().as_millis() as u64,
                path = %path.display(),
                instance_count = doc.instances.len(),
                rule_count = doc.rules.len()
            );
            Ok(doc)
        }
        Err(err) => {
            log_op_error!(
                "load_document",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = %path.display()
            );
            Err(err)
        }
    }
}

fn read_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(MofxError::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| MofxError::io(path, e))?;
    let text = decode_text(&bytes);
    Ok(Document::from_instances(parse_str(&text)))
}

/// Load two documents on separate threads and wait for both.
///
/// # Errors
///
/// The first document's error wins when both fail. `WorkerPanicked` if a
/// loader thread panics.
pub fn load_pair(path1: &Path, path2: &Path) -> Result<(Document, Document)> {
    std::thread::scope(|scope| {
        let first = scope.spawn(|| load_document(path1));
        let second = scope.spawn(|| load_document(path2));

        let doc1 = join(first)?;
        let doc2 = join(second)?;
        Ok((doc1, doc2))
    })
}

fn join(handle: std::thread::ScopedJoinHandle<'_, Result<Document>>) -> Result<Document> {
    handle.join().map_err(|_| MofxError::WorkerPanicked {
        message: "document loader thread panicked".to_string(),
    })?
}

/// Decode file bytes using the byte-order mark, defaulting to UTF-8.
///
/// Invalid sequences are replaced rather than rejected; the parser is
/// best-effort anyway.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_plain_utf8() {
        assert_eq!(decode_text(b"instance of X"), "instance of X");
    }

    #[test]
    fn test_decode_utf8_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFabc"), "abc");
    }

    #[test]
    fn test_decode_utf16_le() {
        let bytes = utf16le_with_bom("Ensure = \"Present\";");
        assert_eq!(decode_text(&bytes), "Ensure = \"Present\";");
    }

    #[test]
    fn test_decode_utf16_be() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "ok".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text(&bytes), "ok");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_document(Path::new("/definitely/not/here.mof")).unwrap_err();
        assert!(matches!(err, MofxError::DocumentNotFound { .. }));
    }
}
