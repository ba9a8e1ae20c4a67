use std::marker::PhantomData;

use crate::container::{Container, ContainerError, Interface};
use crate::module::dsl::{Scoped, Singleton, ToLifetime, Transient};
use crate::provider::component::{ComponentProvider, Provides};

#[allow(private_bounds)]
pub struct ComponentBinding<I, T, L>
where
    I: Interface + ?Sized,
    T: Provides<I>,
    L: ToLifetime,
{
    tag: String,
    _marker: PhantomData<(fn() -> Box<I>, T, L)>,
}

#[allow(private_bounds)]
impl<I, T, L> ComponentBinding<I, T, L>
where
    I: Interface + ?Sized,
    T: Provides<I>,
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

    pub fn as_singleton(self) -> ComponentBinding<I, T, Singleton> {
        ComponentBinding::new(self.tag)
    }

    pub fn as_transient(self) -> ComponentBinding<I, T, Transient> {
        ComponentBinding::new(self.tag)
    }

    pub fn as_scoped(self) -> ComponentBinding<I, T, Scoped> {
        ComponentBinding::new(self.tag)
    }

    pub fn set_on(self, container: &Container) -> Result<(), ContainerError> {
        container.register_provider::<I, _>(L::LIFETIME, &self.tag, ComponentProvider::<T>::new())
    }
}
