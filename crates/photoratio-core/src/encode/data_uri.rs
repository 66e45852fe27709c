//! `data:` URI packaging for the browser download link.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Wrap encoded bytes in a base64 `data:` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix_and_payload() {
        let uri = to_data_uri("image/jpeg", &[0xFF, 0xD8, 0xFF]);
        assert_eq!(uri, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_data_uri_empty_payload() {
        assert_eq!(to_data_uri("image/png", &[]), "data:image/png;base64,");
    }
}
