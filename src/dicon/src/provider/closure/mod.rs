use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;
use crate::provider::Provider;

/// A [`Provider`] which supplies instances from a closure.
///
/// The closure receives the requesting [`Container`] and may resolve other
/// services from it. Errors it returns are passed through untouched.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dicon::prelude::*;
/// # use dicon::provider::closure::ClosureProvider;
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "Hello".to_owned()
///     }
/// }
///
/// let provider = ClosureProvider::new(|_: &Container| {
///     Ok::<_, ContainerError>(Arc::new(English) as Arc<dyn Greeter>)
/// });
/// ```
pub struct ClosureProvider<F> {
    closure: F,
}

impl<F> ClosureProvider<F> {
    pub fn new(closure: F) -> Self {
        Self { closure }
    }
}

impl<F> Debug for ClosureProvider<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureProvider<F>")
            .finish_non_exhaustive()
    }
}

impl<I, F> Provider<I> for ClosureProvider<F>
where
    I: Interface + ?Sized,
    F: Fn(&Container) -> Result<Arc<I>, ContainerError> + Send + Sync + 'static,
{
    fn provide(&self, container: &Container, _key: &ServiceKey) -> Result<Arc<I>, ContainerError> {
        (self.closure)(container)
    }
}
