//! API routing resolution
//!
//! Decides once, at startup, which base URL each logical backend service
//! (accounts, transactions) is reached through. Three mutually exclusive
//! modes are checked in priority order:
//!
//! 1. `Direct`   - every service on its own host (`use_direct`)
//! 2. `Gateway`  - both services behind one API gateway (`use_gateway`)
//! 3. `Relative` - empty base URLs, paths resolved against the public origin
//!
//! Resolution never fails: absent or malformed values fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::ApiConfig;

/// Default API gateway address
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";
/// Default account service address (direct mode)
pub const DEFAULT_ACCOUNT_SERVICE_URL: &str = "http://localhost:8081";
/// Default transaction service address (direct mode)
pub const DEFAULT_TRANSACTION_SERVICE_URL: &str = "http://localhost:8082";

/// Routing mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Each service is called on its own base URL
    Direct,
    /// Both services share the gateway base URL
    Gateway,
    /// No host prefix, same-origin deployment behind a reverse proxy
    Relative,
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingMode::Direct => write!(f, "DIRECT"),
            RoutingMode::Gateway => write!(f, "GATEWAY"),
            RoutingMode::Relative => write!(f, "RELATIVE"),
        }
    }
}

/// Resolved base URLs for the two logical services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRoutes {
    pub mode: RoutingMode,
    /// Empty in relative mode
    pub account_base_url: String,
    /// Empty in relative mode
    pub transaction_base_url: String,
}

impl ServiceRoutes {
    /// Resolve the routing mode and base URLs from the API settings.
    ///
    /// Flags are checked in the order direct > gateway > relative; the first
    /// one set wins. Debug builds log the outcome once.
    pub fn resolve(api: &ApiConfig) -> Self {
        let routes = if api.use_direct {
            ServiceRoutes {
                mode: RoutingMode::Direct,
                account_base_url: sanitize_url(api.account_service_url.as_deref(), DEFAULT_ACCOUNT_SERVICE_URL),
                transaction_base_url: sanitize_url(api.transaction_service_url.as_deref(), DEFAULT_TRANSACTION_SERVICE_URL),
            }
        } else if api.use_gateway {
            let gateway = sanitize_url(api.gateway_url.as_deref(), DEFAULT_GATEWAY_URL);
            ServiceRoutes {
                mode: RoutingMode::Gateway,
                account_base_url: gateway.clone(),
                transaction_base_url: gateway,
            }
        } else {
            ServiceRoutes {
                mode: RoutingMode::Relative,
                account_base_url: String::new(),
                transaction_base_url: String::new(),
            }
        };

        routes.log_diagnostics();
        routes
    }

    /// True when requests carry no host prefix
    pub fn is_relative(&self) -> bool {
        self.mode == RoutingMode::Relative
    }

    /// Human-readable base URL, "(same origin)" when empty
    pub fn display_url(base_url: &str) -> &str {
        if base_url.is_empty() { "(same origin)" } else { base_url }
    }

    #[cfg(debug_assertions)]
    fn log_diagnostics(&self) {
        log::info!(
            "API configuration: mode={}, account_base_url={}, transaction_base_url={}",
            self.mode,
            Self::display_url(&self.account_base_url),
            Self::display_url(&self.transaction_base_url),
        );
    }

    #[cfg(not(debug_assertions))]
    fn log_diagnostics(&self) {}
}

/// Parse an environment flag. Only the literal `true` (any case) enables it.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.trim().eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// Use `value` as a base URL when it looks like one, otherwise `default`.
/// Trailing slashes are dropped so `<base><path>` never doubles them.
fn sanitize_url(value: Option<&str>, default: &str) -> String {
    let candidate = value.map(str::trim).unwrap_or("").trim_end_matches('/');
    let host = candidate
        .strip_prefix("http://")
        .or_else(|| candidate.strip_prefix("https://"));
    let looks_valid = match host {
        Some(rest) => !rest.is_empty() && !rest.contains(char::is_whitespace),
        None => false,
    };

    if looks_valid {
        candidate.to_string()
    } else {
        default.to_string()
    }
}
