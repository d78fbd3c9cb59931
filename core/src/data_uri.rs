//! `data:` URI handling for images attached to notes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use crate::errors::{MinutesError, MinutesResult};
use crate::types::InlineData;

/// Split `data:<mimeType>;base64,<data>` into its MIME type and raw base64 payload.
pub fn parse_data_uri(uri: &str) -> MinutesResult<InlineData> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| MinutesError::InvalidDataUri("missing data: scheme".to_string()))?;

    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| MinutesError::InvalidDataUri("missing payload separator".to_string()))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim();
    if mime_type.is_empty() {
        return Err(MinutesError::InvalidDataUri("missing MIME type".to_string()));
    }
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(MinutesError::InvalidDataUri(
            "payload is not base64 encoded".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(MinutesError::InvalidDataUri("empty payload".to_string()));
    }

    Ok(InlineData {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
    })
}

/// Build a base64 data URI from raw bytes.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Guess an image MIME type from a file extension.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mime_type_and_payload() {
        let inline = parse_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "iVBORw0KGgo=");
    }

    #[test]
    fn tolerates_extra_parameters() {
        let inline = parse_data_uri("data:image/jpeg;name=board.jpg;base64,/9j/4AAQ").unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, "/9j/4AAQ");
    }

    #[test]
    fn rejects_malformed_uris() {
        for uri in [
            "image/png;base64,AAAA",
            "data:image/png;base64",
            "data:;base64,AAAA",
            "data:image/png,AAAA",
            "data:image/png;base64,",
        ] {
            assert!(
                matches!(parse_data_uri(uri), Err(MinutesError::InvalidDataUri(_))),
                "accepted {uri}"
            );
        }
    }

    #[test]
    fn encoded_uri_parses_back() {
        let uri = encode_data_uri("image/png", b"hello");
        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
        assert_eq!(parse_data_uri(&uri).unwrap().data, "aGVsbG8=");
    }

    #[test]
    fn mime_type_from_extension() {
        assert_eq!(image_mime_type(Path::new("board.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime_type(Path::new("notes.webp")), Some("image/webp"));
        assert_eq!(image_mime_type(Path::new("notes.txt")), None);
        assert_eq!(image_mime_type(Path::new("notes")), None);
    }
}
