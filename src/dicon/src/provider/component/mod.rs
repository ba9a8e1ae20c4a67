use std::any;
use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;
use crate::provider::Provider;

/// A type the container knows how to construct.
///
/// Usually, you don't need to implement the [`Component`] trait manually for
/// your components, because the [`component`] macro helps with this. In case
/// that you really want to write implementation in your own, take a look at
/// the following code snippet:
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use dicon::prelude::*;
/// trait Logger: Send + Sync {
///     fn log(&self, message: &str);
/// }
///
/// struct Service {
///     logger: Arc<dyn Logger>,
/// }
///
/// impl Component for Service {
///     type Error = Infallible;
///
///     fn construct(container: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
///         let logger = container.resolve_singleton::<dyn Logger>("")?;
///         Ok(Ok(Self { logger }))
///     }
/// }
/// ```
///
/// Dependencies are fetched explicitly from the [`Container`]; nothing is
/// wired automatically.
///
/// [`component`]: crate::component
pub trait Component: Send + Sync + Sized + 'static {
    /// The error occurred in construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Retrieves the dependencies from the container and creates the object.
    ///
    /// # Errors
    ///
    /// Returns a [`ContainerError`] if a dependency can't be resolved. The
    /// container hands it back to the original caller unchanged.
    ///
    /// Returns an inner error [`Component::Error`] wrapped in the outer [`Ok`]
    /// if the construction fails. The container reports it as
    /// [`ContainerError::ObjectConstruction`].
    fn construct(container: &Container) -> Result<Result<Self, Self::Error>, ContainerError>;
}

/// Declares that a [`Component`] can stand in for the interface `I`.
///
/// This is the compile-time check that an implementation satisfies its
/// interface: registering `T` as `I` requires `T: Provides<I>`. Every
/// component provides itself. For trait objects the implementation is a
/// plain unsizing coercion, which the [`component`] macro generates:
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use dicon::prelude::*;
/// trait Logger: Send + Sync {}
///
/// #[derive(Default)]
/// struct ConsoleLogger;
///
/// impl Logger for ConsoleLogger {}
///
/// #[component(dyn Logger)]
/// impl ConsoleLogger {}
///
/// let container = Container::new();
/// container.register_singleton::<dyn Logger, ConsoleLogger>("").unwrap();
/// ```
///
/// [`component`]: crate::component
pub trait Provides<I>: Component
where
    I: Interface + ?Sized,
{
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T> Provides<T> for T
where
    T: Component,
{
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// A [`Provider`] constructing a [`Component`] and upcasting it to `I`.
pub struct ComponentProvider<C>
where
    C: Component,
{
    _marker: PhantomData<C>,
}

impl<C> ComponentProvider<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Debug for ComponentProvider<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentProvider<C>")
            .field("component", &any::type_name::<C>())
            .finish()
    }
}

impl<I, C> Provider<I> for ComponentProvider<C>
where
    I: Interface + ?Sized,
    C: Provides<I>,
{
    fn provide(&self, container: &Container, key: &ServiceKey) -> Result<Arc<I>, ContainerError> {
        debug!(%key, component = any::type_name::<C>(), "constructing component");
        match C::construct(container) {
            Ok(Ok(obj)) => Ok(<C as Provides<I>>::upcast(Arc::new(obj))),
            Ok(Err(err)) => Err(ContainerError::ObjectConstruction {
                key: key.clone(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::fmt::Display;

    use super::*;
    use crate::scope::Lifetime;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            String::from("Hello")
        }
    }

    impl Component for English {
        type Error = Infallible;

        fn construct(_container: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
            Ok(Ok(Self))
        }
    }

    impl Provides<dyn Greeter> for English {
        fn upcast(self: Arc<Self>) -> Arc<dyn Greeter> {
            self
        }
    }

    #[derive(Debug)]
    struct Refused;

    impl Display for Refused {
        fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
            write!(f, "connection refused")
        }
    }

    impl Error for Refused {}

    #[derive(Debug)]
    struct Unreachable;

    impl Component for Unreachable {
        type Error = Refused;

        fn construct(_container: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
            Ok(Err(Refused))
        }
    }

    #[derive(Debug)]
    struct NeedsNumber(Arc<i32>);

    impl Component for NeedsNumber {
        type Error = Infallible;

        fn construct(container: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
            Ok(Ok(Self(container.resolve_singleton("number")?)))
        }
    }

    #[test]
    fn component_provider_succeeds() {
        let provider = ComponentProvider::<English>::new();
        let container = Container::new();
        let key = ServiceKey::untagged::<dyn Greeter>();

        let greeter: Arc<dyn Greeter> = provider.provide(&container, &key).unwrap();
        assert_eq!(greeter.greet(), "Hello");

        let concrete: Arc<English> = provider
            .provide(&container, &ServiceKey::untagged::<English>())
            .unwrap();
        assert_eq!(concrete.greet(), "Hello");
    }

    #[test]
    fn component_provider_wraps_construction_errors() {
        let provider = ComponentProvider::<Unreachable>::new();
        let container = Container::new();
        let key = ServiceKey::of::<Unreachable>("remote");

        let err = Provider::<Unreachable>::provide(&provider, &container, &key).unwrap_err();
        let ContainerError::ObjectConstruction { key: failed, source } = err else {
            panic!("the error should be `ObjectConstruction`");
        };
        assert_eq!(failed, key);
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn component_provider_passes_container_errors_through() {
        let provider = ComponentProvider::<NeedsNumber>::new();
        let container = Container::new();
        let key = ServiceKey::untagged::<NeedsNumber>();

        let err = Provider::<NeedsNumber>::provide(&provider, &container, &key).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::ServiceNotRegistered {
                lifetime: Lifetime::Singleton,
                ..
            }
        ));
        assert_eq!(err.key(), Some(&ServiceKey::of::<i32>("number")));
    }
}
