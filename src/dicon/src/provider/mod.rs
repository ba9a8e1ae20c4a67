pub mod closure;
pub mod component;
pub mod instance;

use std::fmt::Debug;
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;

/// A factory producing shared instances of the interface `I`.
///
/// A [`Provider`] is what a registration stores. It is invoked once at
/// registration for singletons, and on demand for transient and scoped
/// services. Each call should produce a new instance; sharing is decided by
/// the container, not by the provider.
///
/// The [`Container`] passed in is the one performing the request, so a
/// provider may resolve the services its product depends on. The `key` is
/// the identity being requested and is only meant for diagnostics.
///
/// Usually you don't need to implement [`Provider`] yourself. Components are
/// wrapped in a [`ComponentProvider`], closures in a [`ClosureProvider`] and
/// ready-made instances in an [`InstanceProvider`].
///
/// [`ComponentProvider`]: component::ComponentProvider
/// [`ClosureProvider`]: closure::ClosureProvider
/// [`InstanceProvider`]: instance::InstanceProvider
pub trait Provider<I>: Debug + Send + Sync + 'static
where
    I: Interface + ?Sized,
{
    /// Provides a newly created instance of `I`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or if the
    /// construction itself fails. Errors raised by the container while
    /// resolving dependencies should be returned as they are.
    fn provide(&self, container: &Container, key: &ServiceKey) -> Result<Arc<I>, ContainerError>;
}

impl<I> Provider<I> for Box<dyn Provider<I>>
where
    I: Interface + ?Sized,
{
    fn provide(&self, container: &Container, key: &ServiceKey) -> Result<Arc<I>, ContainerError> {
        (**self).provide(container, key)
    }
}
