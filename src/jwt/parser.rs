use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base64url;
use super::error::{SegmentDecodeError, VerificationError, VerificationResult};

/// Decoded JOSE header of a Firebase ID token.
#[derive(Clone, Debug, Deserialize)]
pub struct JwtHeader {
    /// Signing algorithm. Must be present; only RS256 is accepted downstream.
    #[serde(default)]
    pub alg: String,

    /// Id of the provider key that signed this token.
    #[serde(default)]
    pub kid: String,

    /// Token type, usually `"JWT"`. Not validated.
    pub typ: Option<String>,
}

/// Decoded claims of a Firebase ID token.
///
/// All claims are optional at the parsing stage; the claims validator is the
/// step that requires them. Claims this crate does not interpret are kept
/// verbatim in [`extra`](Self::extra) rather than dropped.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Issuer, `https://securetoken.google.com/<project-id>` for valid tokens.
    pub iss: Option<String>,

    /// Audience, the Firebase project id.
    pub aud: Option<String>,

    /// Subject, the Firebase UID of the user.
    pub sub: Option<String>,

    /// Issued-at time (epoch seconds).
    pub iat: Option<i64>,

    /// Expiration time (epoch seconds).
    pub exp: Option<i64>,

    /// Time the user authenticated (epoch seconds).
    pub auth_time: Option<i64>,

    /// User's email address.
    pub email: Option<String>,

    /// Whether the user's email has been verified.
    pub email_verified: Option<bool>,

    /// User's display name.
    pub name: Option<String>,

    /// URL to the user's profile picture.
    pub picture: Option<String>,

    /// User's phone number in E.164 format.
    pub phone_number: Option<String>,

    /// Firebase-specific claims (sign-in provider, linked identities).
    pub firebase: Option<FirebaseProvider>,

    /// Claims this crate does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Firebase-specific metadata included in the token under the `firebase` field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FirebaseProvider {
    /// The main sign-in provider used (e.g. "google.com", "password",
    /// "anonymous").
    pub sign_in_provider: Option<String>,

    /// A map of identity providers to their unique ids for this user.
    #[serde(default)]
    pub identities: Map<String, Value>,
}

/// A structurally parsed token. Lives for the scope of one verification call.
#[derive(Debug)]
pub struct ParsedJwt {
    /// The decoded JOSE header.
    pub header: JwtHeader,

    /// The decoded claims.
    pub payload: TokenPayload,

    /// The exact `header.payload` substring the signature covers. Kept as the
    /// original text, never re-serialized, so signature verification sees the
    /// same bytes the provider signed.
    pub signed_content: String,

    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

/// Splits and decodes a compact JWT without verifying anything about it.
///
/// Fails on anything but three segments, on undecodable header or payload
/// segments, and on a header without non-empty `alg` and `kid`.
pub fn parse(token: &str) -> VerificationResult<ParsedJwt> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, signature_b64] = segments.as_slice() else {
        return Err(VerificationError::InvalidFormat);
    };

    let header: JwtHeader =
        decode_segment(header_b64).map_err(VerificationError::HeaderDecode)?;
    let payload: TokenPayload =
        decode_segment(payload_b64).map_err(VerificationError::PayloadDecode)?;

    if header.alg.is_empty() || header.kid.is_empty() {
        return Err(VerificationError::MissingHeaderFields);
    }

    let signature =
        base64url::decode(signature_b64).map_err(VerificationError::SignatureDecode)?;

    Ok(ParsedJwt {
        header,
        payload,
        signed_content: format!("{header_b64}.{payload_b64}"),
        signature,
    })
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
) -> Result<T, SegmentDecodeError> {
    let bytes = base64url::decode(segment)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::BASE64_URL_SAFE_NO_PAD;
    use base64::Engine;
    use serde_json::json;

    fn segment(value: &serde_json::Value) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(value.to_string())
    }

    fn test_token() -> String {
        let header = segment(&json!({"alg": "RS256", "kid": "key-1", "typ": "JWT"}));
        let payload = segment(&json!({
            "iss": "https://securetoken.google.com/demo",
            "aud": "demo",
            "sub": "uid-1",
            "iat": 1000,
            "exp": 2000,
            "auth_time": 1000,
            "email": "user@example.com",
            "custom_claim": "preserved",
        }));
        let signature = BASE64_URL_SAFE_NO_PAD.encode(b"signature-bytes");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn parses_a_well_formed_token() {
        let token = test_token();
        let parsed = parse(&token).unwrap();

        assert_eq!(parsed.header.alg, "RS256");
        assert_eq!(parsed.header.kid, "key-1");
        assert_eq!(parsed.header.typ.as_deref(), Some("JWT"));
        assert_eq!(parsed.payload.sub.as_deref(), Some("uid-1"));
        assert_eq!(parsed.payload.exp, Some(2000));
        assert_eq!(parsed.payload.email.as_deref(), Some("user@example.com"));
        assert_eq!(parsed.signature, b"signature-bytes");
    }

    #[test]
    fn signed_content_is_the_literal_first_two_segments() {
        let token = test_token();
        let parsed = parse(&token).unwrap();

        let dot = token.rfind('.').unwrap();
        assert_eq!(parsed.signed_content, &token[..dot]);
    }

    #[test]
    fn unknown_claims_land_in_extra() {
        let parsed = parse(&test_token()).unwrap();
        assert_eq!(
            parsed.payload.extra.get("custom_claim"),
            Some(&json!("preserved"))
        );
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        for token in ["one", "one.two", "a.b.c.d"] {
            assert!(
                matches!(parse(token), Err(VerificationError::InvalidFormat)),
                "expected InvalidFormat for {token:?}"
            );
        }
    }

    #[test]
    fn rejects_undecodable_header() {
        let payload = segment(&json!({"sub": "x"}));
        let token = format!("!!!not-base64!!!.{payload}.c2ln");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::HeaderDecode(_))
        ));
    }

    #[test]
    fn rejects_header_that_is_not_json() {
        let header = BASE64_URL_SAFE_NO_PAD.encode("plain text");
        let payload = segment(&json!({"sub": "x"}));
        let token = format!("{header}.{payload}.c2ln");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::HeaderDecode(_))
        ));
    }

    #[test]
    fn rejects_undecodable_payload() {
        let header = segment(&json!({"alg": "RS256", "kid": "key-1"}));
        let token = format!("{header}.???.c2ln");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::PayloadDecode(_))
        ));
    }

    #[test]
    fn rejects_header_without_alg() {
        let header = segment(&json!({"kid": "key-1"}));
        let payload = segment(&json!({"sub": "x"}));
        let token = format!("{header}.{payload}.c2ln");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::MissingHeaderFields)
        ));
    }

    #[test]
    fn rejects_header_without_kid() {
        let header = segment(&json!({"alg": "RS256"}));
        let payload = segment(&json!({"sub": "x"}));
        let token = format!("{header}.{payload}.c2ln");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::MissingHeaderFields)
        ));
    }

    #[test]
    fn rejects_undecodable_signature() {
        let header = segment(&json!({"alg": "RS256", "kid": "key-1"}));
        let payload = segment(&json!({"sub": "x"}));
        let token = format!("{header}.{payload}.!!!");
        assert!(matches!(
            parse(&token),
            Err(VerificationError::SignatureDecode(_))
        ));
    }
}
