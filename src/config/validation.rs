//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Detect malformed or duplicate route patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("no routes configured")]
    NoRoutes,

    #[error("route {0:?} must start with '/'")]
    RouteNotAbsolute(String),

    #[error("duplicate route {0:?}")]
    DuplicateRoute(String),

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("script.max_form_bytes must be greater than 0")]
    ZeroFormLimit,

    #[error("observability.log_filter must not be empty")]
    EmptyLogFilter,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }
    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.starts_with('/') {
            errors.push(ValidationError::RouteNotAbsolute(route.clone()));
        }
        if !seen.insert(route.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.script.max_form_bytes == 0 {
        errors.push(ValidationError::ZeroFormLimit);
    }
    if config.observability.log_filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.routes = vec!["users".into(), "/a".into(), "/a".into()];
        config.timeouts.request_secs = 0;
        config.script.max_form_bytes = 0;
        config.observability.log_filter = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::RouteNotAbsolute("users".into()),
                ValidationError::DuplicateRoute("/a".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::ZeroFormLimit,
                ValidationError::EmptyLogFilter,
            ]
        );
    }

    #[test]
    fn test_empty_routes_rejected() {
        let mut config = GatewayConfig::default();
        config.routes.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::NoRoutes]
        );
    }
}
