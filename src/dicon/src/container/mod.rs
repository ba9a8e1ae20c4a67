mod core;
pub(crate) mod error;
mod handle;
mod registry;

pub use error::ContainerError;
pub use handle::Container;

/// Types that can be registered and resolved as a service interface.
///
/// Any `Send + Sync + 'static` type qualifies, sized or not. In practice an
/// interface is usually a trait object such as `dyn Logger`.
pub trait Interface: Send + Sync + 'static {}

impl<T> Interface for T where T: ?Sized + Send + Sync + 'static {}
