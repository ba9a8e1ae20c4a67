use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::module::dsl::closure_helper::ClosureBinding;
use crate::module::dsl::component_helper::ComponentBinding;
use crate::module::dsl::instance_helper::InstanceBinding;
use crate::module::dsl::provider_helper::ProviderBinding;
use crate::module::dsl::{Scoped, Singleton, ToLifetime, Transient};
use crate::provider::component::{Component, ComponentProvider, Provides};
use crate::provider::Provider;

#[allow(private_bounds)]
pub struct MetadataBinding<I, L>
where
    I: Interface + ?Sized,
    L: ToLifetime,
{
    tag: String,
    _marker: PhantomData<(fn() -> Arc<I>, L)>,
}

#[allow(private_bounds)]
impl<I, L> MetadataBinding<I, L>
where
    I: Interface + ?Sized,
    L: ToLifetime,
{
    pub(super) fn new(tag: String) -> Self {
        Self {
            tag,
            _marker: PhantomData,
        }
    }

    pub fn tagged(self, tag: &str) -> Self {
        Self::new(tag.to_owned())
    }

    pub fn as_singleton(self) -> MetadataBinding<I, Singleton> {
        MetadataBinding::new(self.tag)
    }

    pub fn as_transient(self) -> MetadataBinding<I, Transient> {
        MetadataBinding::new(self.tag)
    }

    pub fn as_scoped(self) -> MetadataBinding<I, Scoped> {
        MetadataBinding::new(self.tag)
    }

    pub fn to_component<T>(self) -> ComponentBinding<I, T, L>
    where
        T: Provides<I>,
    {
        ComponentBinding::new(self.tag)
    }

    pub fn to_closure<F>(self, closure: F) -> ClosureBinding<I, L, F>
    where
        F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
    {
        ClosureBinding::new(closure, self.tag)
    }

    /// Binds an existing instance. Such bindings are always singletons.
    pub fn to_instance(self, instance: Arc<I>) -> InstanceBinding<I> {
        InstanceBinding::new(instance, self.tag)
    }

    pub fn to_provider<P>(self, provider: P) -> ProviderBinding<I, L, P>
    where
        P: Provider<I>,
    {
        ProviderBinding::new(provider, self.tag)
    }
}

#[allow(private_bounds)]
impl<C, L> MetadataBinding<C, L>
where
    C: Component,
    L: ToLifetime,
{
    /// Binds the component to itself.
    pub fn set_on(self, container: &Container) -> Result<(), ContainerError> {
        container.register_provider::<C, _>(L::LIFETIME, &self.tag, ComponentProvider::<C>::new())
    }
}
