use super::error::{VerificationError, VerificationResult};
use super::parser::TokenPayload;
use crate::config::Issuer;

/// Validates time and identity claims against the expected Firebase project.
///
/// Checks run in a fixed order and the first violated rule is returned:
/// `exp`, `iat`, `aud`, `iss`, `sub`, `auth_time`. Comparisons are strict
/// against `now` (whole epoch seconds) with no clock-skew leeway.
pub fn validate(
    payload: &TokenPayload,
    project_id: &str,
    now: i64,
) -> VerificationResult<()> {
    match payload.exp {
        Some(exp) if exp > now => {}
        _ => return Err(VerificationError::Expired),
    }

    match payload.iat {
        Some(iat) if iat <= now => {}
        _ => return Err(VerificationError::IssuedInFuture),
    }

    match payload.aud.as_deref() {
        Some(aud) if aud == project_id => {}
        aud => {
            return Err(VerificationError::InvalidAudience {
                expected: project_id.to_owned(),
                actual: aud.unwrap_or_default().to_owned(),
            })
        }
    }

    let expected_issuer = Issuer::new(project_id);
    match payload.iss.as_deref() {
        Some(iss) if iss == &*expected_issuer => {}
        iss => {
            return Err(VerificationError::InvalidIssuer {
                expected: expected_issuer.to_string(),
                actual: iss.unwrap_or_default().to_owned(),
            })
        }
    }

    match payload.sub.as_deref() {
        Some(sub) if !sub.is_empty() => {}
        _ => return Err(VerificationError::InvalidSubject),
    }

    match payload.auth_time {
        Some(auth_time) if auth_time <= now => Ok(()),
        _ => Err(VerificationError::InvalidAuthTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const PROJECT: &str = "test-project-id";

    fn valid_payload() -> TokenPayload {
        TokenPayload {
            iss: Some(format!("https://securetoken.google.com/{PROJECT}")),
            aud: Some(PROJECT.into()),
            sub: Some("user123".into()),
            iat: Some(NOW - 60),
            exp: Some(NOW + 3600),
            auth_time: Some(NOW - 60),
            ..TokenPayload::default()
        }
    }

    #[test]
    fn accepts_a_valid_payload() {
        assert!(validate(&valid_payload(), PROJECT, NOW).is_ok());
    }

    #[test]
    fn rejects_expired_token() {
        let mut payload = valid_payload();
        payload.exp = Some(NOW - 1);
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::Expired)
        ));
    }

    #[test]
    fn expiry_exactly_now_is_expired() {
        let mut payload = valid_payload();
        payload.exp = Some(NOW);
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::Expired)
        ));
    }

    #[test]
    fn missing_exp_is_expired() {
        let mut payload = valid_payload();
        payload.exp = None;
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::Expired)
        ));
    }

    #[test]
    fn rejects_token_issued_in_the_future() {
        let mut payload = valid_payload();
        payload.iat = Some(NOW + 10);
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::IssuedInFuture)
        ));
    }

    #[test]
    fn iat_exactly_now_is_accepted() {
        let mut payload = valid_payload();
        payload.iat = Some(NOW);
        assert!(validate(&payload, PROJECT, NOW).is_ok());
    }

    #[test]
    fn rejects_wrong_audience() {
        let mut payload = valid_payload();
        payload.aud = Some("another-project".into());
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::InvalidAudience { .. })
        ));
    }

    #[test]
    fn rejects_wrong_issuer() {
        let mut payload = valid_payload();
        payload.iss = Some("https://evil.example.com/test-project-id".into());
        let err = validate(&payload, PROJECT, NOW).unwrap_err();
        match err {
            VerificationError::InvalidIssuer { expected, .. } => {
                assert_eq!(
                    expected,
                    "https://securetoken.google.com/test-project-id"
                );
            }
            other => panic!("expected InvalidIssuer, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_subject() {
        let mut payload = valid_payload();
        payload.sub = Some(String::new());
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::InvalidSubject)
        ));
    }

    #[test]
    fn rejects_future_auth_time() {
        let mut payload = valid_payload();
        payload.auth_time = Some(NOW + 30);
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::InvalidAuthTime)
        ));
    }

    #[test]
    fn missing_auth_time_is_rejected() {
        let mut payload = valid_payload();
        payload.auth_time = None;
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::InvalidAuthTime)
        ));
    }

    #[test]
    fn expiry_is_reported_before_other_violations() {
        // An expired token with a wrong audience reports Expired; the rules
        // run in a fixed order.
        let mut payload = valid_payload();
        payload.exp = Some(NOW - 1);
        payload.aud = Some("another-project".into());
        assert!(matches!(
            validate(&payload, PROJECT, NOW),
            Err(VerificationError::Expired)
        ));
    }
}
