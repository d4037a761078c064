//! Per-method view handed to the namer.

use apigen_config::{InterfaceConfig, MethodConfig, ResolveError};
use apigen_model::Method;

/// A method together with its resolved config and owning interface config.
#[derive(Debug, Clone, Copy)]
pub struct MethodContext<'a> {
    interface_config: &'a InterfaceConfig,
    method_config: &'a MethodConfig,
}

impl<'a> MethodContext<'a> {
    pub fn new(interface_config: &'a InterfaceConfig, method_config: &'a MethodConfig) -> Self {
        Self {
            interface_config,
            method_config,
        }
    }

    /// Context for a method of the interface; fails if it has no config.
    pub fn for_method(
        interface_config: &'a InterfaceConfig,
        method: &Method,
    ) -> Result<Self, ResolveError> {
        let method_config = interface_config.method_config(method)?;
        Ok(Self::new(interface_config, method_config))
    }

    pub fn interface_config(&self) -> &'a InterfaceConfig {
        self.interface_config
    }

    pub fn method_config(&self) -> &'a MethodConfig {
        self.method_config
    }

    pub fn method(&self) -> &'a Method {
        self.method_config.method()
    }

    pub fn is_long_running(&self) -> bool {
        self.method_config.is_long_running()
    }

    pub fn is_page_streaming(&self) -> bool {
        self.method_config.is_page_streaming()
    }
}
