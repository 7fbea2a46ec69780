//! Service configuration

/// Environment-driven configuration. The platform base URL and the
/// privileged service credential are supplied out-of-band; when either
/// is absent the platform calls simply fail and surface as provisioning
/// errors, so startup never aborts on missing credentials.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Auth/database platform base URL.
    pub platform_url: String,
    /// Privileged service-role credential for admin operations.
    pub service_role_key: String,
    /// Listen address.
    pub bind_addr: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let config = Self {
            platform_url: std::env::var("AGENTDESK_PLATFORM_URL").unwrap_or_default(),
            service_role_key: std::env::var("AGENTDESK_SERVICE_ROLE_KEY").unwrap_or_default(),
            bind_addr: std::env::var("AGENTDESK_BIND").unwrap_or_else(|_| "0.0.0.0:8787".into()),
        };
        if config.platform_url.is_empty() || config.service_role_key.is_empty() {
            tracing::warn!(
                "AGENTDESK_PLATFORM_URL / AGENTDESK_SERVICE_ROLE_KEY not set; \
                 provisioning calls will fail"
            );
        }
        config
    }
}
