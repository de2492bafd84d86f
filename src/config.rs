use std::env;
use std::ops::Deref;

/// The issuer Firebase stamps into ID tokens for a given project.
#[derive(Debug, Clone)]
pub struct Issuer(String);

impl Issuer {
    /// Derives the issuer URL for a project id.
    pub fn new(project_id: impl AsRef<str>) -> Issuer {
        let issuer =
            format!("https://securetoken.google.com/{}", project_id.as_ref());
        Issuer(issuer)
    }
}

impl Deref for Issuer {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

/// Runtime configuration: the expected project id (audience and issuer
/// derivation), the provider endpoints, and the API key used by the identity
/// REST passthrough calls.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    project_id: String,
    api_key: Option<String>,
    jwk_url: String,
    identity_url: String,
    secure_token_url: String,
}

impl FirebaseConfig {
    pub(crate) const JWK_URL: &str = "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
    pub(crate) const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
    pub(crate) const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

    /// Creates a configuration for a project, with the production Google
    /// endpoints.
    pub fn new(project_id: impl AsRef<str>) -> FirebaseConfig {
        FirebaseConfig {
            project_id: project_id.as_ref().to_owned(),
            api_key: None,
            jwk_url: Self::JWK_URL.to_owned(),
            identity_url: Self::IDENTITY_URL.to_owned(),
            secure_token_url: Self::SECURE_TOKEN_URL.to_owned(),
        }
    }

    /// Reads `FIREBASE_PROJECT_ID` (required) and `FIREBASE_API_KEY`
    /// (optional) from the environment.
    pub fn from_env() -> crate::Result<FirebaseConfig> {
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| crate::Error::Config("FIREBASE_PROJECT_ID"))?;

        let mut config = FirebaseConfig::new(project_id);
        if let Ok(api_key) = env::var("FIREBASE_API_KEY") {
            config = config.with_api_key(api_key);
        }
        Ok(config)
    }

    /// Sets the API key used by identity REST passthrough calls.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> FirebaseConfig {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the JWK endpoint, mainly for tests and emulators.
    pub fn with_jwk_url(mut self, url: impl Into<String>) -> FirebaseConfig {
        self.jwk_url = url.into();
        self
    }

    /// Overrides the identity REST endpoint.
    pub fn with_identity_url(mut self, url: impl Into<String>) -> FirebaseConfig {
        self.identity_url = url.into();
        self
    }

    /// Overrides the secure-token endpoint used for refresh-token exchange.
    pub fn with_secure_token_url(mut self, url: impl Into<String>) -> FirebaseConfig {
        self.secure_token_url = url.into();
        self
    }

    /// The expected audience of verified tokens.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The API key for identity REST calls, when configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The JWK endpoint keys are fetched from.
    pub fn jwk_url(&self) -> &str {
        &self.jwk_url
    }

    pub(crate) fn identity_url(&self) -> &str {
        &self.identity_url
    }

    pub(crate) fn secure_token_url(&self) -> &str {
        &self.secure_token_url
    }

    /// The expected issuer of verified tokens.
    pub fn issuer(&self) -> Issuer {
        Issuer::new(&self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuer_is_derived_from_the_project_id() {
        let config = FirebaseConfig::new("demo-project");
        assert_eq!(
            &*config.issuer(),
            "https://securetoken.google.com/demo-project"
        );
        assert_eq!(config.project_id(), "demo-project");
    }

    #[test]
    fn builder_overrides_replace_defaults() {
        let config = FirebaseConfig::new("demo")
            .with_api_key("key-123")
            .with_jwk_url("http://localhost:1234/jwk");
        assert_eq!(config.api_key(), Some("key-123"));
        assert_eq!(config.jwk_url(), "http://localhost:1234/jwk");
        assert_eq!(config.identity_url(), FirebaseConfig::IDENTITY_URL);
    }
}
