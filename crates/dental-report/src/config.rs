//! Environment-based application configuration.

use std::env;

const DEFAULT_FHIR_BASE_URL: &str = "https://xsct.norwayeast.cloudapp.azure.com/fhir";
const DEFAULT_VALUE_SET_URI: &str = "http://snomed.info/xsct/11000003106";

/// Terminology-server connection settings.
///
/// Read from the environment:
///
/// | Variable | Meaning | Default |
/// |----------|---------|---------|
/// | `DENTAL_FHIR_URL` | FHIR base URL | Norwegian extension server |
/// | `DENTAL_FHIR_VALUE_SET` | Implicit value-set URI | `http://snomed.info/xsct/11000003106` |
/// | `DENTAL_FHIR_USERNAME` | Basic-auth username | unset (no auth header) |
/// | `DENTAL_FHIR_PASSWORD` | Basic-auth password | unset |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// FHIR server base URL, without a trailing slash.
    pub fhir_base_url: String,
    /// Implicit value-set URI used for ECL expansions.
    pub value_set_uri: String,
    /// Basic-auth username, if the server requires credentials.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the environment, falling back to
    /// defaults for everything but credentials.
    pub fn from_env() -> Self {
        Self {
            fhir_base_url: env::var("DENTAL_FHIR_URL")
                .unwrap_or_else(|_| DEFAULT_FHIR_BASE_URL.to_string()),
            value_set_uri: env::var("DENTAL_FHIR_VALUE_SET")
                .unwrap_or_else(|_| DEFAULT_VALUE_SET_URI.to_string()),
            username: env::var("DENTAL_FHIR_USERNAME").ok(),
            password: env::var("DENTAL_FHIR_PASSWORD").ok(),
        }
    }
}
