use std::any::TypeId;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::core::ContainerCore;
use crate::container::{ContainerError, Interface};
use crate::key::ServiceKey;
use crate::module::Module;
use crate::provider::closure::ClosureProvider;
use crate::provider::component::{ComponentProvider, Provides};
use crate::provider::instance::InstanceProvider;
use crate::provider::Provider;
use crate::scope::{Lifetime, Scope, ScopedRef};

/// A cheaply clonable handle to a dependency injection container.
///
/// Every clone shares the same registry. The container keeps three
/// independent partitions, one per [`Lifetime`], and each of them maps a
/// [`ServiceKey`] (interface type plus tag) to at most one registration.
///
/// Registering and resolving can happen from any thread, and from inside the
/// providers themselves.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dicon::prelude::*;
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         String::from("Hello")
///     }
/// }
///
/// #[component(dyn Greeter)]
/// impl English {}
///
/// let container = Container::new();
/// container.register_singleton::<dyn Greeter, English>("").unwrap();
///
/// let greeter = container.resolve_singleton::<dyn Greeter>("").unwrap();
/// assert_eq!(greeter.greet(), "Hello");
/// ```
///
/// Holding a [`Container`] clone inside a singleton creates a reference
/// cycle, and neither will ever be dropped.
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            core: Arc::new(ContainerCore::new()),
        }
    }

    /// Creates a container and lets `module` register its services.
    pub fn with_module<M>(module: &M) -> Result<Self, ContainerError>
    where
        M: Module + ?Sized,
    {
        let container = Self::new();
        container.install(module)?;
        Ok(container)
    }

    /// Lets `module` register its services on this container.
    ///
    /// Registrations made before a failure are kept.
    pub fn install<M>(&self, module: &M) -> Result<(), ContainerError>
    where
        M: Module + ?Sized,
    {
        module.configure(self)
    }

    /// Registers the component `T` as the singleton `I` under `tag`.
    ///
    /// `T` is constructed right away. Every dependency it resolves as a
    /// singleton must therefore be registered before it.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateRegistration`] if the key is taken,
    /// or whatever error the construction of `T` fails with. In both cases
    /// the container is left unchanged.
    pub fn register_singleton<I, T>(&self, tag: &str) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        T: Provides<I>,
    {
        self.register_provider::<I, _>(Lifetime::Singleton, tag, ComponentProvider::<T>::new())
    }

    /// Registers the component `T` as the transient `I` under `tag`.
    pub fn register_transient<I, T>(&self, tag: &str) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        T: Provides<I>,
    {
        self.register_provider::<I, _>(Lifetime::Transient, tag, ComponentProvider::<T>::new())
    }

    /// Registers the component `T` as the scoped `I` under `tag`.
    pub fn register_scoped<I, T>(&self, tag: &str) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        T: Provides<I>,
    {
        self.register_provider::<I, _>(Lifetime::Scoped, tag, ComponentProvider::<T>::new())
    }

    /// Registers the result of `factory` as the singleton `I` under `tag`.
    /// `factory` is called exactly once, before this method returns.
    pub fn register_singleton_with<I, F>(&self, tag: &str, factory: F) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
    {
        self.register_provider(Lifetime::Singleton, tag, ClosureProvider::new(factory))
    }

    pub fn register_transient_with<I, F>(&self, tag: &str, factory: F) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
    {
        self.register_provider(Lifetime::Transient, tag, ClosureProvider::new(factory))
    }

    pub fn register_scoped_with<I, F>(&self, tag: &str, factory: F) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
    {
        self.register_provider(Lifetime::Scoped, tag, ClosureProvider::new(factory))
    }

    /// Registers an existing instance as the singleton `I` under `tag`.
    pub fn register_instance<I>(&self, tag: &str, instance: Arc<I>) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
    {
        self.register_provider(Lifetime::Singleton, tag, InstanceProvider::new(instance))
    }

    /// Registers an arbitrary [`Provider`] of `I` under `tag`.
    pub fn register_provider<I, P>(
        &self,
        lifetime: Lifetime,
        tag: &str,
        provider: P,
    ) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
        P: Provider<I>,
    {
        self.core
            .register(self, lifetime, ServiceKey::of::<I>(tag), Box::new(provider))
    }

    /// Returns the singleton `I` registered under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ServiceNotRegistered`] if no singleton is
    /// registered under the key, even when a transient or scoped one is.
    pub fn resolve_singleton<I>(&self, tag: &str) -> Result<Arc<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        self.core.resolve_singleton(ServiceKey::of::<I>(tag))
    }

    /// Creates a new instance of the transient `I` registered under `tag`.
    /// The caller becomes its sole owner.
    pub fn resolve_transient<I>(&self, tag: &str) -> Result<Arc<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        self.core.resolve_transient(self, ServiceKey::of::<I>(tag))
    }

    /// Creates an empty [`Scope`] to resolve scoped services in.
    pub fn create_scope(&self) -> Arc<Scope> {
        Arc::new(Scope::new())
    }

    /// Creates the scoped `I` registered under `tag` and stores it in
    /// `scope`, which keeps ownership of the instance.
    ///
    /// If `scope` already holds an instance for the key, nothing is created
    /// and an empty [`ScopedRef`] is returned.
    pub fn resolve_scoped<I>(&self, scope: &Scope, tag: &str) -> Result<ScopedRef<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        self.core
            .resolve_scoped(self, scope, ServiceKey::of::<I>(tag))
    }

    pub fn is_registered<I>(&self, lifetime: Lifetime, tag: &str) -> bool
    where
        I: Interface + ?Sized,
    {
        self.core.contains(lifetime, &ServiceKey::of::<I>(tag))
    }

    /// Returns the sorted tags `I` is registered under with `lifetime`.
    pub fn tags<I>(&self, lifetime: Lifetime) -> Vec<String>
    where
        I: Interface + ?Sized,
    {
        self.core.tags(lifetime, TypeId::of::<I>())
    }

    /// Returns the number of registrations with `lifetime`.
    pub fn count(&self, lifetime: Lifetime) -> usize {
        self.core.count(lifetime)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Container")
            .field("singleton", &self.count(Lifetime::Singleton))
            .field("transient", &self.count(Lifetime::Transient))
            .field("scoped", &self.count(Lifetime::Scoped))
            .finish()
    }
}
