use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::module::dsl::{Scoped, Singleton, ToLifetime, Transient};
use crate::provider::closure::ClosureProvider;

#[allow(private_bounds)]
pub struct ClosureBinding<I, L, F>
where
    I: Interface + ?Sized,
    L: ToLifetime,
    F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
{
    closure: F,
    tag: String,
    _marker: PhantomData<(fn() -> Box<I>, L)>,
}

#[allow(private_bounds)]
impl<I, L, F> ClosureBinding<I, L, F>
where
    I: Interface + ?Sized,
    L: ToLifetime,
    F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
{
    pub(super) fn new(closure: F, tag: String) -> Self {
        Self {
            closure,
            tag,
            _marker: PhantomData,
        }
    }

    pub fn tagged(self, tag: &str) -> Self {
        Self::new(self.closure, tag.to_owned())
    }

    pub fn as_singleton(self) -> ClosureBinding<I, Singleton, F> {
        ClosureBinding::new(self.closure, self.tag)
    }

    pub fn as_transient(self) -> ClosureBinding<I, Transient, F> {
        ClosureBinding::new(self.closure, self.tag)
    }

    pub fn as_scoped(self) -> ClosureBinding<I, Scoped, F> {
        ClosureBinding::new(self.closure, self.tag)
    }

    pub fn set_on(self, container: &Container) -> Result<(), ContainerError> {
        container.register_provider(L::LIFETIME, &self.tag, ClosureProvider::new(self.closure))
    }
}
