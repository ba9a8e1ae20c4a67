use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;
use crate::provider::Provider;
use crate::util::any::AsAny;

/// The type-erased face of every holder kept in a registry partition.
///
/// Nothing but identification and destruction is reachable through it; the
/// container recovers the typed holder with a checked downcast, using the
/// interface type requested by the caller.
pub trait ErasedHolder: AsAny + Debug + Send + Sync {
    fn interface_name(&self) -> &'static str;
}

/// Holds the provider of a transient or scoped service. Every call to
/// [`FactoryHolder::create`] runs the provider again.
pub struct FactoryHolder<I>
where
    I: Interface + ?Sized,
{
    provider: Box<dyn Provider<I>>,
}

impl<I> FactoryHolder<I>
where
    I: Interface + ?Sized,
{
    pub fn new(provider: Box<dyn Provider<I>>) -> Self {
        Self { provider }
    }

    pub fn create(&self, container: &Container, key: &ServiceKey) -> Result<Arc<I>, ContainerError> {
        self.provider.provide(container, key)
    }
}

impl<I> Debug for FactoryHolder<I>
where
    I: Interface + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FactoryHolder")
            .field("interface", &any::type_name::<I>())
            .field("provider", &self.provider)
            .finish()
    }
}

impl<I> ErasedHolder for FactoryHolder<I>
where
    I: Interface + ?Sized,
{
    fn interface_name(&self) -> &'static str {
        any::type_name::<I>()
    }
}

/// Holds the single instance of a singleton service. The provider has
/// already run by the time this holder exists and is not kept.
pub struct SingletonHolder<I>
where
    I: Interface + ?Sized,
{
    instance: Arc<I>,
}

impl<I> SingletonHolder<I>
where
    I: Interface + ?Sized,
{
    pub fn new(instance: Arc<I>) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> Arc<I> {
        Arc::clone(&self.instance)
    }
}

impl<I> Debug for SingletonHolder<I>
where
    I: Interface + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SingletonHolder")
            .field("interface", &any::type_name::<I>())
            .finish_non_exhaustive()
    }
}

impl<I> ErasedHolder for SingletonHolder<I>
where
    I: Interface + ?Sized,
{
    fn interface_name(&self) -> &'static str {
        any::type_name::<I>()
    }
}
