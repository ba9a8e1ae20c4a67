pub mod closure_helper;
pub mod component_helper;
pub mod instance_helper;
pub mod metadata_helper;
pub mod provider_helper;

use metadata_helper::MetadataBinding;

use crate::container::Interface;
use crate::scope::Lifetime;

/// Type-level lifetime selected on a binding.
#[allow(private_bounds)]
pub trait ToLifetime: Sealed {
    const LIFETIME: Lifetime;
}

#[derive(Debug, Clone, Copy)]
pub struct Singleton;

#[derive(Debug, Clone, Copy)]
pub struct Transient;

#[derive(Debug, Clone, Copy)]
pub struct Scoped;

impl ToLifetime for Singleton {
    const LIFETIME: Lifetime = Lifetime::Singleton;
}

impl ToLifetime for Transient {
    const LIFETIME: Lifetime = Lifetime::Transient;
}

impl ToLifetime for Scoped {
    const LIFETIME: Lifetime = Lifetime::Scoped;
}

trait Sealed {}

impl Sealed for Singleton {}

impl Sealed for Transient {}

impl Sealed for Scoped {}

/// Starts a binding of the interface `I`, untagged and transient.
///
/// ```rust
/// # use std::sync::Arc;
/// # use dicon::prelude::*;
/// trait Greeter: Send + Sync {}
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {}
///
/// #[component(dyn Greeter)]
/// impl English {}
///
/// fn greeters(container: &Container) -> Result<(), ContainerError> {
///     bind::<dyn Greeter>()
///         .tagged("en")
///         .as_singleton()
///         .to_component::<English>()
///         .set_on(container)?;
///     bind::<u16>().to_instance(Arc::new(8080)).set_on(container)
/// }
///
/// let container = Container::with_module(&greeters).unwrap();
/// assert!(container.is_registered::<dyn Greeter>(Lifetime::Singleton, "en"));
/// ```
pub fn bind<I>() -> MetadataBinding<I, Transient>
where
    I: Interface + ?Sized,
{
    MetadataBinding::new(String::new())
}
