//! HTTP client settings shared by scrape and remote endpoints.

use serde::{Deserialize, Serialize};

use promforge_core::Secret;

/// Username/password credentials for HTTP basic auth.
///
/// The password may be carried inline as a [`Secret`] or referenced by
/// file path; setting both is legal on the wire and Prometheus prefers
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// The username, sent in clear.
    pub username: String,
    /// Inline password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,
    /// Path to a file holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<String>,
}

impl BasicAuth {
    /// Creates credentials with no password set.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
            password_file: None,
        }
    }

    /// Sets the inline password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<Secret>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the password file path.
    #[must_use]
    pub fn with_password_file(mut self, path: impl Into<String>) -> Self {
        self.password_file = Some(path.into());
        self
    }
}

/// `Authorization` header credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    /// The scheme; Prometheus defaults to `Bearer` when omitted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    /// The credential value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Secret>,
}

impl Authorization {
    /// Creates bearer-token credentials, leaving the scheme to the
    /// server default.
    #[must_use]
    pub fn bearer(credentials: impl Into<Secret>) -> Self {
        Self {
            auth_type: None,
            credentials: Some(credentials.into()),
        }
    }

    /// Sets an explicit scheme.
    #[must_use]
    pub fn with_type(mut self, auth_type: impl Into<String>) -> Self {
        self.auth_type = Some(auth_type.into());
        self
    }
}

/// TLS settings for scrape targets and remote endpoints.
///
/// `insecure_skip_verify` is tri-state: the key is absent unless
/// explicitly set, and an explicit `false` is emitted as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// CA bundle used to verify the server certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    /// Client certificate for mutual TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    /// Client key for mutual TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    /// Expected server name (SNI and verification).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Disables certificate verification when `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
}

impl TlsConfig {
    /// Creates an empty TLS block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CA bundle path.
    #[must_use]
    pub fn with_ca_file(mut self, path: impl Into<String>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Sets the client certificate path.
    #[must_use]
    pub fn with_cert_file(mut self, path: impl Into<String>) -> Self {
        self.cert_file = Some(path.into());
        self
    }

    /// Sets the client key path.
    #[must_use]
    pub fn with_key_file(mut self, path: impl Into<String>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// Sets the expected server name.
    #[must_use]
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Sets certificate verification explicitly.
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = Some(skip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_omits_unset_password_fields() {
        let yaml = serde_yaml::to_string(&BasicAuth::new("prom")).unwrap();
        assert_eq!(yaml, "username: prom\n");
    }

    #[test]
    fn basic_auth_serializes_password_raw() {
        let auth = BasicAuth::new("prom").with_password("hunter2");
        let yaml = serde_yaml::to_string(&auth).unwrap();
        assert!(yaml.contains("password: hunter2"), "{yaml}");
        assert_eq!(format!("{:?}", auth.password.unwrap()), "Secret(<secret>)");
    }

    #[test]
    fn authorization_renames_type_key() {
        let auth = Authorization::bearer("tok").with_type("Bearer");
        let yaml = serde_yaml::to_string(&auth).unwrap();
        assert_eq!(yaml, "type: Bearer\ncredentials: tok\n");
    }

    #[test]
    fn tls_tri_state_false_is_emitted() {
        let tls = TlsConfig::new().with_insecure_skip_verify(false);
        assert_eq!(
            serde_yaml::to_string(&tls).unwrap(),
            "insecure_skip_verify: false\n"
        );
    }

    #[test]
    fn tls_tri_state_unset_is_omitted() {
        let tls = TlsConfig::new().with_ca_file("/etc/prometheus/ca.crt");
        let yaml = serde_yaml::to_string(&tls).unwrap();
        assert!(!yaml.contains("insecure_skip_verify"), "{yaml}");
    }
}
