//! A generation run: every configured interface, resolved independently.

use crate::diagnostic::{DiagCollector, Diagnostic};
use crate::error::ResolveError;
use crate::interface::{InterfaceConfig, resolve_into};
use crate::schema::{ConfigProto, InterfaceConfigProto};
use apigen_model::Model;
use rayon::prelude::*;

/// How one interface came out of a run.
#[derive(Debug)]
pub enum InterfaceOutcome {
    Resolved(InterfaceConfig),
    /// Errors were recorded; see the interface's diagnostics.
    Failed,
    /// A fatal lookup aborted this interface only.
    Aborted(ResolveError),
}

impl InterfaceOutcome {
    pub fn config(&self) -> Option<&InterfaceConfig> {
        match self {
            InterfaceOutcome::Resolved(config) => Some(config),
            _ => None,
        }
    }
}

/// Result for one interface of a run.
#[derive(Debug)]
pub struct InterfaceReport {
    pub name: String,
    pub outcome: InterfaceOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// Results of a whole run, in config declaration order.
#[derive(Debug)]
pub struct ApiResolution {
    pub interfaces: Vec<InterfaceReport>,
}

impl ApiResolution {
    pub fn is_ok(&self) -> bool {
        self.interfaces
            .iter()
            .all(|r| matches!(r.outcome, InterfaceOutcome::Resolved(_)))
    }

    pub fn interface_config(&self, name: &str) -> Option<&InterfaceConfig> {
        self.interfaces
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.outcome.config())
    }

    pub fn configs(&self) -> impl Iterator<Item = &InterfaceConfig> {
        self.interfaces.iter().filter_map(|r| r.outcome.config())
    }

    /// Every diagnostic of the run, paired with its interface name.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.interfaces
            .iter()
            .flat_map(|r| r.diagnostics.iter().map(move |d| (r.name.as_str(), d)))
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|(_, d)| d.is_error()).count()
    }
}

/// Resolve every interface of `config` against `model`.
///
/// Interfaces run in parallel, each with its own collector. A fatal error
/// only loses the interface that raised it.
pub fn resolve_api(model: &Model, config: &ConfigProto) -> ApiResolution {
    let interfaces = config
        .interfaces
        .par_iter()
        .map(|proto| resolve_one(model, proto))
        .collect();
    ApiResolution { interfaces }
}

fn resolve_one(model: &Model, proto: &InterfaceConfigProto) -> InterfaceReport {
    let mut diags = DiagCollector::new();
    let outcome = match resolve_into(&mut diags, model, proto) {
        Ok(Some(config)) => InterfaceOutcome::Resolved(config),
        Ok(None) => InterfaceOutcome::Failed,
        Err(e) => {
            tracing::warn!(interface = %proto.name, error = %e, "interface resolution aborted");
            InterfaceOutcome::Aborted(e)
        }
    };
    if matches!(outcome, InterfaceOutcome::Failed) {
        tracing::warn!(
            interface = %proto.name,
            errors = diags.error_count(),
            "interface config has errors"
        );
    }
    InterfaceReport {
        name: proto.name.clone(),
        outcome,
        diagnostics: diags.into_diagnostics(),
    }
}
