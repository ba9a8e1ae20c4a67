//! A process-wide container with an explicit lifecycle.
//!
//! Nothing is installed until [`install`] is called, and [`teardown`] hands
//! the container back so that its services are dropped at a known point.

use parking_lot::RwLock;
use snafu::prelude::*;
use tracing::debug;

use crate::container::error::{GlobalAlreadyInstalledSnafu, GlobalNotInstalledSnafu};
use crate::container::{Container, ContainerError};

static GLOBAL: RwLock<Option<Container>> = parking_lot::const_rwlock(None);

/// Makes `container` the global container.
///
/// # Errors
///
/// Returns [`ContainerError::GlobalAlreadyInstalled`] if another container
/// is installed. It is left in place.
pub fn install(container: Container) -> Result<(), ContainerError> {
    let mut global = GLOBAL.write();
    ensure!(global.is_none(), GlobalAlreadyInstalledSnafu);
    *global = Some(container);
    debug!("installed the global container");
    Ok(())
}

/// Returns a handle to the global container.
pub fn container() -> Result<Container, ContainerError> {
    GLOBAL.read().clone().context(GlobalNotInstalledSnafu)
}

/// Uninstalls the global container and returns it, if any.
pub fn teardown() -> Option<Container> {
    let previous = GLOBAL.write().take();
    if previous.is_some() {
        debug!("tore down the global container");
    }
    previous
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn global_lifecycle_succeeds() {
        assert!(matches!(
            container(),
            Err(ContainerError::GlobalNotInstalled {})
        ));
        assert!(teardown().is_none());

        let installed = Container::new();
        installed.register_instance("", Arc::new(42i32)).unwrap();
        install(installed).unwrap();

        assert!(matches!(
            install(Container::new()),
            Err(ContainerError::GlobalAlreadyInstalled {})
        ));
        let global = container().unwrap();
        assert_eq!(*global.resolve_singleton::<i32>("").unwrap(), 42);

        let previous = teardown().unwrap();
        assert_eq!(*previous.resolve_singleton::<i32>("").unwrap(), 42);
        assert!(container().is_err());
    }
}
