use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};

/// A binding to a ready-made instance, which can only be a singleton.
pub struct InstanceBinding<I>
where
    I: Interface + ?Sized,
{
    instance: Arc<I>,
    tag: String,
}

impl<I> InstanceBinding<I>
where
    I: Interface + ?Sized,
{
    pub(super) fn new(instance: Arc<I>, tag: String) -> Self {
        Self { instance, tag }
    }

    pub fn tagged(self, tag: &str) -> Self {
        Self::new(self.instance, tag.to_owned())
    }

    pub fn set_on(self, container: &Container) -> Result<(), ContainerError> {
        container.register_instance(&self.tag, self.instance)
    }
}
