//! Retry policy registry: named retry code sets and named retry timing settings.

use crate::diagnostic::DiagCollector;
use crate::schema::{InterfaceConfigProto, RetryParamsDefinitionProto};
use crate::status::StatusCode;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Retry code set name -> status codes eligible for retry.
pub type RetryCodesDefinition = IndexMap<String, BTreeSet<StatusCode>>;

/// Retry settings name -> timing policy.
pub type RetrySettingsDefinition = IndexMap<String, RetrySettings>;

/// Timing policy governing retry pacing for generated clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetrySettings {
    pub initial_retry_delay: Duration,
    pub retry_delay_multiplier: f64,
    pub max_retry_delay: Duration,
    pub initial_rpc_timeout: Duration,
    pub rpc_timeout_multiplier: f64,
    pub max_rpc_timeout: Duration,
    pub total_timeout: Duration,
}

impl RetrySettings {
    /// Validate a raw parameter record, reporting the first rule it breaks.
    pub fn from_proto(proto: &RetryParamsDefinitionProto) -> Result<Self, String> {
        let initial_retry_delay =
            millis("initial_retry_delay_millis", proto.initial_retry_delay_millis)?;
        let retry_delay_multiplier =
            multiplier("retry_delay_multiplier", proto.retry_delay_multiplier)?;
        let max_retry_delay = millis("max_retry_delay_millis", proto.max_retry_delay_millis)?;
        let initial_rpc_timeout =
            millis("initial_rpc_timeout_millis", proto.initial_rpc_timeout_millis)?;
        let rpc_timeout_multiplier =
            multiplier("rpc_timeout_multiplier", proto.rpc_timeout_multiplier)?;
        let max_rpc_timeout = millis("max_rpc_timeout_millis", proto.max_rpc_timeout_millis)?;
        let total_timeout = millis("total_timeout_millis", proto.total_timeout_millis)?;

        if max_retry_delay < initial_retry_delay {
            return Err("max retry delay must not be shorter than initial delay".to_string());
        }
        if max_rpc_timeout < initial_rpc_timeout {
            return Err("max rpc timeout must not be shorter than initial timeout".to_string());
        }

        Ok(Self {
            initial_retry_delay,
            retry_delay_multiplier,
            max_retry_delay,
            initial_rpc_timeout,
            rpc_timeout_multiplier,
            max_rpc_timeout,
            total_timeout,
        })
    }
}

fn millis(field: &str, value: Option<i64>) -> Result<Duration, String> {
    match value {
        None => Err(format!("missing required field {field}")),
        Some(ms) if ms < 0 => Err(format!("{field} must not be negative, got {ms}")),
        Some(ms) => Ok(Duration::from_millis(ms as u64)),
    }
}

fn multiplier(field: &str, value: Option<f64>) -> Result<f64, String> {
    match value {
        None => Err(format!("missing required field {field}")),
        Some(m) if !m.is_finite() || m < 1.0 => {
            Err(format!("{field} must be at least 1, got {m}"))
        }
        Some(m) => Ok(m),
    }
}

/// Resolve the interface's named retry code sets.
///
/// Unknown code tokens are reported but do not drop the set: it is built from
/// the tokens that did resolve and is still registered under its name.
pub fn create_retry_codes_definition(
    diags: &mut DiagCollector,
    proto: &InterfaceConfigProto,
) -> RetryCodesDefinition {
    let mut definition = RetryCodesDefinition::new();
    for retry_def in &proto.retry_codes_def {
        let mut codes = BTreeSet::new();
        for code_text in &retry_def.retry_codes {
            match code_text.parse::<StatusCode>() {
                Ok(code) => {
                    codes.insert(code);
                }
                Err(_) => diags.error(format!(
                    "status code not found: '{}' (in interface {})",
                    code_text, proto.name
                )),
            }
        }
        if definition.contains_key(&retry_def.name) {
            diags.error(format!(
                "duplicate retry codes definition: '{}' (in interface {})",
                retry_def.name, proto.name
            ));
            continue;
        }
        tracing::debug!(name = %retry_def.name, codes = codes.len(), "retry codes definition");
        definition.insert(retry_def.name.clone(), codes);
    }
    definition
}

/// Resolve the interface's named retry settings.
///
/// A malformed entry yields one diagnostic and is left out entirely.
pub fn create_retry_settings_definition(
    diags: &mut DiagCollector,
    proto: &InterfaceConfigProto,
) -> RetrySettingsDefinition {
    let mut definition = RetrySettingsDefinition::new();
    for retry_def in &proto.retry_params_def {
        let settings = match RetrySettings::from_proto(retry_def) {
            Ok(settings) => settings,
            Err(reason) => {
                diags.error(format!(
                    "error while creating retry params: {} (in interface {})",
                    reason, proto.name
                ));
                continue;
            }
        };
        if definition.contains_key(&retry_def.name) {
            diags.error(format!(
                "duplicate retry params definition: '{}' (in interface {})",
                retry_def.name, proto.name
            ));
            continue;
        }
        tracing::debug!(name = %retry_def.name, "retry params definition");
        definition.insert(retry_def.name.clone(), settings);
    }
    definition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RetryCodesDefinitionProto;

    fn codes_def(name: &str, codes: &[&str]) -> RetryCodesDefinitionProto {
        RetryCodesDefinitionProto {
            name: name.to_string(),
            retry_codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn default_params(name: &str) -> RetryParamsDefinitionProto {
        RetryParamsDefinitionProto {
            name: name.to_string(),
            initial_retry_delay_millis: Some(100),
            retry_delay_multiplier: Some(1.3),
            max_retry_delay_millis: Some(60_000),
            initial_rpc_timeout_millis: Some(20_000),
            rpc_timeout_multiplier: Some(1.0),
            max_rpc_timeout_millis: Some(20_000),
            total_timeout_millis: Some(600_000),
        }
    }

    #[test]
    fn known_codes_resolve_in_canonical_order() {
        let proto = InterfaceConfigProto {
            name: "google.example.v1.Library".into(),
            retry_codes_def: vec![
                codes_def("idempotent", &["UNAVAILABLE", "DEADLINE_EXCEEDED"]),
                codes_def("non_idempotent", &[]),
            ],
            ..Default::default()
        };
        let mut diags = DiagCollector::new();
        let def = create_retry_codes_definition(&mut diags, &proto);

        assert!(!diags.has_errors());
        let idempotent: Vec<_> = def["idempotent"].iter().copied().collect();
        assert_eq!(
            idempotent,
            vec![StatusCode::DeadlineExceeded, StatusCode::Unavailable]
        );
        assert!(def["non_idempotent"].is_empty());
    }

    #[test]
    fn unknown_code_is_reported_but_set_is_kept() {
        let proto = InterfaceConfigProto {
            name: "google.example.v1.Library".into(),
            retry_codes_def: vec![codes_def("idempotent", &["UNAVAILABLE", "NOT_A_CODE"])],
            ..Default::default()
        };
        let mut diags = DiagCollector::new();
        let def = create_retry_codes_definition(&mut diags, &proto);

        assert_eq!(diags.error_count(), 1);
        assert_eq!(
            diags.diagnostics()[0].message,
            "status code not found: 'NOT_A_CODE' (in interface google.example.v1.Library)"
        );
        assert_eq!(
            def["idempotent"],
            BTreeSet::from([StatusCode::Unavailable])
        );
    }

    #[test]
    fn duplicate_code_set_keeps_first() {
        let proto = InterfaceConfigProto {
            name: "a.B".into(),
            retry_codes_def: vec![
                codes_def("idempotent", &["UNAVAILABLE"]),
                codes_def("idempotent", &["ABORTED"]),
            ],
            ..Default::default()
        };
        let mut diags = DiagCollector::new();
        let def = create_retry_codes_definition(&mut diags, &proto);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(def.len(), 1);
        assert!(def["idempotent"].contains(&StatusCode::Unavailable));
    }

    #[test]
    fn valid_settings() {
        let proto = InterfaceConfigProto {
            name: "a.B".into(),
            retry_params_def: vec![default_params("default")],
            ..Default::default()
        };
        let mut diags = DiagCollector::new();
        let def = create_retry_settings_definition(&mut diags, &proto);
        assert!(!diags.has_errors());
        let settings = &def["default"];
        assert_eq!(settings.initial_retry_delay, Duration::from_millis(100));
        assert_eq!(settings.retry_delay_multiplier, 1.3);
        assert_eq!(settings.total_timeout, Duration::from_secs(600));
    }

    #[test]
    fn malformed_settings_skipped_with_one_diagnostic() {
        let mut broken = default_params("broken");
        broken.retry_delay_multiplier = None;
        broken.total_timeout_millis = Some(-1);

        let proto = InterfaceConfigProto {
            name: "a.B".into(),
            retry_params_def: vec![broken, default_params("default")],
            ..Default::default()
        };
        let mut diags = DiagCollector::new();
        let def = create_retry_settings_definition(&mut diags, &proto);

        assert_eq!(diags.error_count(), 1);
        assert!(diags.diagnostics()[0].message.contains("retry_delay_multiplier"));
        assert!(!def.contains_key("broken"));
        assert!(def.contains_key("default"));
    }

    #[test]
    fn settings_bounds() {
        let mut p = default_params("p");
        p.max_retry_delay_millis = Some(10);
        assert!(RetrySettings::from_proto(&p).is_err());

        let mut p = default_params("p");
        p.rpc_timeout_multiplier = Some(0.5);
        assert!(RetrySettings::from_proto(&p).is_err());

        let mut p = default_params("p");
        p.initial_rpc_timeout_millis = Some(-5);
        let err = RetrySettings::from_proto(&p).unwrap_err();
        assert_eq!(err, "initial_rpc_timeout_millis must not be negative, got -5");
    }
}
