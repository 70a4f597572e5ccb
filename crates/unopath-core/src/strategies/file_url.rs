//! Decoder for the restricted `file://` URL dialect of the legacy version file.
//!
//! The accepted dialect is deliberately narrower than a general URL parser:
//!
//! - scheme must be `file://` (any case)
//! - host must be empty or `localhost` (any case)
//! - percent-escapes are decoded byte-wise per segment, then read as UTF-8
//! - an escape that decodes to `/` is rejected, so an encoded segment can never
//!   introduce an extra path boundary
//! - `#` ends the path; the fragment is ignored
//!
//! Decoding runs in two passes: scheme and host are validated first, then the
//! remainder is rebuilt segment by segment.

use std::path::PathBuf;

use crate::error::UrlDecodeError;

const SCHEME: &str = "file://";

/// Decode a legacy location URL into a slash-separated absolute path string.
///
/// `file:///opt/app/` decodes to `/opt/app/` and
/// `file://localhost/opt/app%20x/` to `/opt/app x/`.
pub fn decode_file_url(url: &str) -> Result<String, UrlDecodeError> {
    let prefix = url.as_bytes().get(..SCHEME.len());
    if !prefix.is_some_and(|p| p.eq_ignore_ascii_case(SCHEME.as_bytes())) {
        return Err(UrlDecodeError::NotFileScheme);
    }

    // The prefix is ASCII, so this slice lands on a char boundary.
    let rest = &url[SCHEME.len()..];
    let host_end = rest.find('/').unwrap_or(rest.len());
    let host = &rest[..host_end];
    if !host.is_empty() && !host.eq_ignore_ascii_case("localhost") {
        return Err(UrlDecodeError::ForeignHost(host.to_string()));
    }

    let path = &rest[host_end..];
    if path.is_empty() {
        return Ok("/".to_string());
    }

    let mut decoded = String::with_capacity(path.len());
    let mut offset = SCHEME.len() + host_end + 1;
    for segment in path[1..].split('/') {
        decoded.push('/');
        if decode_segment(segment, offset, &mut decoded)? == SegmentEnd::Fragment {
            break;
        }
        offset += segment.len() + 1;
    }

    Ok(decoded)
}

/// Turn a decoded URL path into a local filesystem path.
pub fn to_local_path(decoded: &str) -> PathBuf {
    #[cfg(windows)]
    {
        // "/C:/Program Files/" names a drive path on Windows
        let bytes = decoded.as_bytes();
        if bytes.len() > 2 && bytes[0] == b'/' && bytes[2] == b':' {
            return PathBuf::from(&decoded[1..]);
        }
    }

    PathBuf::from(decoded)
}

#[derive(Debug, PartialEq, Eq)]
enum SegmentEnd {
    Boundary,
    Fragment,
}

/// Decode one `/`-delimited segment into `out`.
///
/// `base` is the byte offset of the segment within the whole URL, used for
/// error positions.
fn decode_segment(
    segment: &str,
    base: usize,
    out: &mut String,
) -> Result<SegmentEnd, UrlDecodeError> {
    let bytes = segment.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let start = i;
                let mut run = Vec::new();
                while i < bytes.len() && bytes[i] == b'%' {
                    let byte = bytes
                        .get(i + 1..i + 3)
                        .and_then(|pair| Some((hex_value(pair[0])? << 4) | hex_value(pair[1])?))
                        .ok_or(UrlDecodeError::MalformedEscape(base + i))?;
                    if byte == b'/' {
                        return Err(UrlDecodeError::EncodedSeparator(base + i));
                    }
                    run.push(byte);
                    i += 3;
                }
                let text =
                    String::from_utf8(run).map_err(|_| UrlDecodeError::InvalidUtf8(base + start))?;
                out.push_str(&text);
            }
            b'#' => return Ok(SegmentEnd::Fragment),
            _ => {
                // '%' and '#' are ASCII, so the literal run ends on a char boundary.
                let end = bytes[i..]
                    .iter()
                    .position(|&b| b == b'%' || b == b'#')
                    .map_or(bytes.len(), |p| i + p);
                out.push_str(&segment[i..end]);
                i = end;
            }
        }
    }

    Ok(SegmentEnd::Boundary)
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
