//! Helpers for the `data:` URLs images travel in between client and relay.

use base64::Engine as _;

/// Maximum number of reference images a single generation may carry.
pub const MAX_IMAGES: usize = 3;

/// Encode `bytes` as a `data:<mime>;base64,<payload>` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Strip a leading `data:image/<subtype>;base64,` header, returning the bare
/// base64 payload.
///
/// Only image headers whose subtype is a single word (`png`, `jpeg`, `webp`)
/// are recognised; anything else is returned untouched so that already-bare
/// payloads pass straight through.
pub fn strip_data_url_header(image: &str) -> &str {
    let Some(rest) = image.strip_prefix("data:image/") else {
        return image;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return image;
    };
    let is_word = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_word { payload } else { image }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_common_image_headers() {
        assert_eq!(strip_data_url_header("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url_header("data:image/jpeg;base64,/9j/4A"), "/9j/4A");
        assert_eq!(strip_data_url_header("data:image/webp;base64,UklG"), "UklG");
    }

    #[test]
    fn bare_payload_passes_through() {
        assert_eq!(strip_data_url_header("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn non_word_subtypes_are_left_alone() {
        // `svg+xml` is not a single word, so the header stays.
        let svg = "data:image/svg+xml;base64,PHN2Zz4=";
        assert_eq!(strip_data_url_header(svg), svg);
        let video = "data:video/mp4;base64,AAAA";
        assert_eq!(strip_data_url_header(video), video);
    }

    #[test]
    fn encoded_url_strips_back_to_payload() {
        let url = encode_data_url("image/jpeg", b"\xff\xd8\xff");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(strip_data_url_header(&url), "/9j/");
    }
}
