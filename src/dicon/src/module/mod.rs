pub mod dsl;

use std::fmt::{Debug, Formatter, Result as FmtResult};

use tracing::debug;

use crate::container::{Container, ContainerError};

pub use dsl::bind;

/// A unit of configuration registering a group of services.
///
/// Any `Fn(&Container) -> Result<(), ContainerError>` is a module, so a plain
/// function works as well:
///
/// ```rust
/// # use std::sync::Arc;
/// # use dicon::prelude::*;
/// fn settings(container: &Container) -> Result<(), ContainerError> {
///     container.register_instance("port", Arc::new(8080u16))
/// }
///
/// let container = Container::with_module(&settings).unwrap();
/// assert_eq!(*container.resolve_singleton::<u16>("port").unwrap(), 8080);
/// ```
pub trait Module: Send + Sync + 'static {
    /// Registers the services of this module on `container`.
    ///
    /// # Errors
    ///
    /// Returns the first registration error. Registrations made before it
    /// stay in the container.
    fn configure(&self, container: &Container) -> Result<(), ContainerError>;
}

impl<F> Module for F
where
    F: Fn(&Container) -> Result<(), ContainerError> + Send + Sync + 'static,
{
    fn configure(&self, container: &Container) -> Result<(), ContainerError> {
        self(container)
    }
}

/// An ordered collection of modules, itself a [`Module`].
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Configuration {
    fn configure(&self, container: &Container) -> Result<(), ContainerError> {
        debug!(modules = self.modules.len(), "installing configuration");
        self.modules
            .iter()
            .try_for_each(|module| module.configure(container))
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Configuration")
            .field("modules", &self.modules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::scope::Lifetime;

    use super::*;

    fn numbers(container: &Container) -> Result<(), ContainerError> {
        container.register_instance("one", Arc::new(1i32))?;
        container.register_instance("two", Arc::new(2i32))
    }

    fn words(container: &Container) -> Result<(), ContainerError> {
        container.register_instance("one", Arc::new(String::from("one")))
    }

    #[test]
    fn configuration_installs_modules_in_order() {
        let configuration = Configuration::new()
            .with(numbers)
            .compose(Configuration::new().with(words));
        assert_eq!(configuration.len(), 2);

        let container = Container::with_module(&configuration).unwrap();
        assert_eq!(container.tags::<i32>(Lifetime::Singleton), vec!["one", "two"]);
        assert_eq!(
            *container.resolve_singleton::<String>("one").unwrap(),
            "one"
        );
    }

    #[test]
    fn configuration_stops_at_first_error() {
        let configuration = Configuration::new()
            .with(numbers)
            .with(numbers)
            .with(words);

        let container = Container::new();
        let err = container.install(&configuration).unwrap_err();

        assert!(matches!(err, ContainerError::DuplicateRegistration { .. }));
        assert_eq!(container.count(Lifetime::Singleton), 2);
        assert!(!container.is_registered::<String>(Lifetime::Singleton, "one"));
    }
}
