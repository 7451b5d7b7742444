//! SOCKS proxy profile entity
//!
//! One record per named SOCKS configuration. Fields are validated on
//! construction and mutation; the id is assigned once and is the sole
//! equality key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A named SOCKS proxy connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocksProfile {
    #[serde(default = "generate_id")]
    id: String,
    name: String,
    host: String,
    port: u16,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    dns_over_socks: bool,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl SocksProfile {
    /// Create a profile with a fresh id and no credentials
    pub fn new(name: &str, host: &str, port: u16) -> Result<Self> {
        Self::with_details(None, name, host, port, "", "", false)
    }

    /// Create a profile with all fields. A `None` id generates a fresh one.
    pub fn with_details(
        id: Option<String>,
        name: &str,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        dns_over_socks: bool,
    ) -> Result<Self> {
        let name = validated_name(name)?;
        let host = validated_host(host)?;
        validate_port(port)?;

        Ok(Self {
            id: id.unwrap_or_else(generate_id),
            name,
            host,
            port,
            username: username.to_string(),
            password: password.to_string(),
            dns_over_socks,
        })
    }

    /// Copy of this profile under a new name, with a fresh id
    pub fn duplicate(&self, new_name: &str) -> Result<Self> {
        Self::with_details(
            None,
            new_name,
            &self.host,
            self.port,
            &self.username,
            &self.password,
            self.dns_over_socks,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn dns_over_socks(&self) -> bool {
        self.dns_over_socks
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = validated_name(name)?;
        Ok(())
    }

    pub fn set_host(&mut self, host: &str) -> Result<()> {
        self.host = validated_host(host)?;
        Ok(())
    }

    pub fn set_port(&mut self, port: u16) -> Result<()> {
        validate_port(port)?;
        self.port = port;
        Ok(())
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn set_dns_over_socks(&mut self, dns_over_socks: bool) {
        self.dns_over_socks = dns_over_socks;
    }

    /// True iff a username is set; an empty username means no authentication
    pub fn has_authentication(&self) -> bool {
        !self.username.is_empty()
    }

    /// Reassign a fresh id. Used when merge-importing with fresh ids.
    pub(crate) fn regenerate_id(&mut self) {
        self.id = generate_id();
    }
}

/// Profiles are equal iff their ids match, regardless of other fields
impl PartialEq for SocksProfile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SocksProfile {}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validated_host(host: &str) -> Result<String> {
    let trimmed = host.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("host", "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(Error::validation("port", "must be between 1 and 65535"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name_and_host() {
        let profile = SocksProfile::new("  Work  ", " proxy.local ", 9050).unwrap();
        assert_eq!(profile.name(), "Work");
        assert_eq!(profile.host(), "proxy.local");
        assert_eq!(profile.port(), 9050);
        assert_eq!(profile.username(), "");
        assert_eq!(profile.password(), "");
        assert!(!profile.dns_over_socks());
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let result = SocksProfile::new("   ", "localhost", 1080);
        assert!(matches!(
            result,
            Err(Error::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn test_new_rejects_blank_host() {
        let result = SocksProfile::new("Work", "", 1080);
        assert!(matches!(
            result,
            Err(Error::Validation { field: "host", .. })
        ));
    }

    #[test]
    fn test_new_rejects_port_zero() {
        let result = SocksProfile::new("Work", "localhost", 0);
        assert!(matches!(
            result,
            Err(Error::Validation { field: "port", .. })
        ));
    }

    #[test]
    fn test_set_port_revalidates() {
        let mut profile = SocksProfile::new("Work", "localhost", 1080).unwrap();
        assert!(profile.set_port(0).is_err());
        assert_eq!(profile.port(), 1080);

        profile.set_port(65535).unwrap();
        assert_eq!(profile.port(), 65535);
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let original = SocksProfile::with_details(
            None,
            "Work",
            "proxy.local",
            9050,
            "bob",
            "secret",
            true,
        )
        .unwrap();
        let copy = original.duplicate("Work (Copy)").unwrap();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.name(), "Work (Copy)");
        assert_eq!(copy.host(), "proxy.local");
        assert_eq!(copy.port(), 9050);
        assert_eq!(copy.username(), "bob");
        assert_eq!(copy.password(), "secret");
        assert!(copy.dns_over_socks());
    }

    #[test]
    fn test_equality_is_id_only() {
        let a = SocksProfile::new("A", "hosta", 1).unwrap();
        let mut b = a.clone();
        b.set_name("B").unwrap();
        b.set_host("hostb").unwrap();
        assert_eq!(a, b);

        let c = a.duplicate("A").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_has_authentication() {
        let mut profile = SocksProfile::new("Work", "localhost", 1080).unwrap();
        assert!(!profile.has_authentication());

        profile.set_username("bob");
        assert!(profile.has_authentication());

        profile.set_username("");
        assert!(!profile.has_authentication());
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let profile = SocksProfile::with_details(
            Some("abc-123".to_string()),
            "Work",
            "proxy.local",
            9050,
            "bob",
            "x",
            true,
        )
        .unwrap();

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"dnsOverSocks\":true"));
        assert!(json.contains("\"id\":\"abc-123\""));

        let restored: SocksProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
        assert_eq!(restored.name(), profile.name());
        assert_eq!(restored.password(), profile.password());
    }

    #[test]
    fn test_deserialize_fills_missing_optionals() {
        let json = r#"{"name":"Bare","host":"h","port":1}"#;
        let profile: SocksProfile = serde_json::from_str(json).unwrap();
        assert!(!profile.id().is_empty());
        assert_eq!(profile.username(), "");
        assert!(!profile.dns_over_socks());
    }
}
