use std::marker::PhantomData;

use crate::container::{Container, ContainerError, Interface};
use crate::module::dsl::{Scoped, Singleton, ToLifetime, Transient};
use crate::provider::Provider;

#[allow(private_bounds)]
pub struct ProviderBinding<I, L, P>
where
    I: Interface + ?Sized,
    L: ToLifetime,
    P: Provider<I>,
{
    provider: P,
    tag: String,
    _marker: PhantomData<(fn() -> Box<I>, L)>,
}

#[allow(private_bounds)]
impl<I, L, P> ProviderBinding<I, L, P>
where
    I: Interface + ?Sized,
    L: ToLifetime,
    P: Provider<I>,
{
    pub(super) fn new(provider: P, tag: String) -> Self {
        Self {
            provider,
            tag,
            _marker: PhantomData,
        }
    }

    pub fn tagged(self, tag: &str) -> Self {
        Self::new(self.provider, tag.to_owned())
    }

    pub fn as_singleton(self) -> ProviderBinding<I, Singleton, P> {
        ProviderBinding::new(self.provider, self.tag)
    }

    pub fn as_transient(self) -> ProviderBinding<I, Transient, P> {
        ProviderBinding::new(self.provider, self.tag)
    }

    pub fn as_scoped(self) -> ProviderBinding<I, Scoped, P> {
        ProviderBinding::new(self.provider, self.tag)
    }

    pub fn set_on(self, container: &Container) -> Result<(), ContainerError> {
        container.register_provider::<I, _>(L::LIFETIME, &self.tag, self.provider)
    }
}
