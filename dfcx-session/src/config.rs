//! Session service settings
//!
//! Read once at startup and shared with every handler.

use std::path::PathBuf;

/// Default location of the public key served alongside sessions
pub const PUBLIC_PEM_FILENAME: &str = "public_key.pem";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Production mode: landing URIs and cookie domains follow the request host
    pub prod: bool,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Public key file read on every session creation
    pub public_pem_filename: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prod: false,
            bind_addr: "0.0.0.0:5001".to_string(),
            public_pem_filename: PathBuf::from(PUBLIC_PEM_FILENAME),
        }
    }
}

impl Settings {
    /// Creates settings from environment variables
    ///
    /// Expected environment variables:
    /// - PROD (optional, `true` or `1` enables production mode)
    /// - SESSION_BIND_ADDR (optional, default: 0.0.0.0:5001)
    /// - PUBLIC_PEM_FILENAME (optional, default: public_key.pem)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        settings.prod = std::env::var("PROD")
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        if let Ok(addr) = std::env::var("SESSION_BIND_ADDR") {
            settings.bind_addr = addr;
        }

        if let Ok(path) = std::env::var("PUBLIC_PEM_FILENAME") {
            settings.public_pem_filename = PathBuf::from(path);
        }

        settings
    }

    /// Validates the settings
    pub fn validate(&self) -> anyhow::Result<()> {
        let has_port = self
            .bind_addr
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !has_port {
            anyhow::bail!("bind_addr must look like <host>:<port>");
        }

        if self.public_pem_filename.as_os_str().is_empty() {
            anyhow::bail!("public_pem_filename cannot be empty");
        }

        Ok(())
    }

    pub fn production(mut self, prod: bool) -> Self {
        self.prod = prod;
        self
    }

    pub fn with_public_pem(mut self, path: impl Into<PathBuf>) -> Self {
        self.public_pem_filename = path.into();
        self
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("1"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("yes"));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.prod);
        assert_eq!(settings.bind_addr, "0.0.0.0:5001");
        assert_eq!(settings.public_pem_filename, PathBuf::from("public_key.pem"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();

        settings.bind_addr = "localhost".to_string();
        assert!(settings.validate().is_err());

        settings.bind_addr = "127.0.0.1:8000".to_string();
        settings.public_pem_filename = PathBuf::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: serialized with every other test touching the environment
        unsafe {
            std::env::set_var("PROD", "True");
            std::env::set_var("PUBLIC_PEM_FILENAME", "/etc/keys/pub.pem");
            std::env::remove_var("SESSION_BIND_ADDR");
        }

        let settings = Settings::from_env();

        unsafe {
            std::env::remove_var("PROD");
            std::env::remove_var("PUBLIC_PEM_FILENAME");
        }

        assert!(settings.prod);
        assert_eq!(settings.bind_addr, "0.0.0.0:5001");
        assert_eq!(
            settings.public_pem_filename,
            PathBuf::from("/etc/keys/pub.pem")
        );
    }

    #[test]
    #[serial]
    fn test_from_env_empty_prod() {
        unsafe {
            std::env::set_var("PROD", "");
        }
        let settings = Settings::from_env();
        unsafe {
            std::env::remove_var("PROD");
        }

        assert!(!settings.prod);
    }
}
