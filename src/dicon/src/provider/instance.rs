use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;
use crate::provider::Provider;

/// A [`Provider`] handing out clones of one existing instance.
///
/// It backs [`Container::register_instance`], where the singleton has been
/// built by the caller rather than by the container.
pub struct InstanceProvider<I>
where
    I: Interface + ?Sized,
{
    instance: Arc<I>,
}

impl<I> InstanceProvider<I>
where
    I: Interface + ?Sized,
{
    pub fn new(instance: Arc<I>) -> Self {
        Self { instance }
    }
}

impl<I> Debug for InstanceProvider<I>
where
    I: Interface + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceProvider<I>")
            .finish_non_exhaustive()
    }
}

impl<I> Provider<I> for InstanceProvider<I>
where
    I: Interface + ?Sized,
{
    fn provide(&self, _container: &Container, _key: &ServiceKey) -> Result<Arc<I>, ContainerError> {
        Ok(Arc::clone(&self.instance))
    }
}
