use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decodes base64url text (`-`/`_` alphabet, padding optional) to raw bytes.
///
/// The input is mapped to the standard alphabet and padded to a multiple of
/// four before decoding, so unpadded JWT segments never fail on length alone.
pub(crate) fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut mapped: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while mapped.len() % 4 != 0 {
        mapped.push('=');
    }

    STANDARD.decode(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::BASE64_URL_SAFE_NO_PAD;

    #[test]
    fn decodes_unpadded_url_safe_input() {
        // 0xfb 0xff exercises both '-' and '_' in the url-safe alphabet.
        let original: &[u8] = &[0xfb, 0xff, 0x00, 0x12, 0x34, 0x56, 0x78];
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(original);
        assert!(!encoded.contains('='));
        assert_eq!(decode(&encoded).unwrap(), original);
    }

    #[test]
    fn decodes_plain_ascii_round_trip() {
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(b"hello, world");
        assert_eq!(decode(&encoded).unwrap(), b"hello, world");
    }

    #[test]
    fn accepts_already_padded_input() {
        assert_eq!(decode("YQ==").unwrap(), b"a");
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(decode("not base64!!").is_err());
    }

    #[test]
    fn rejects_impossible_length() {
        // Five characters pad to eight with three '=' signs, which no base64
        // decoder accepts.
        assert!(decode("abcde").is_err());
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
