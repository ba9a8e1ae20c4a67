use std::any::Any;
use std::ops::Deref;

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Downcasting through a smart pointer to a `dyn AsAny`-like trait object.
///
/// Calling `as_any()` on an `Arc<dyn Trait>` directly would pick the blanket
/// implementation for the `Arc` itself, so the pointee is always reached with
/// an explicit dereference here.
pub trait DowncastRef {
    fn downcast_ref<T: Any>(&self) -> Option<&T>;
}

impl<S> DowncastRef for S
where
    S: Deref<Target: AsAny>,
{
    #[inline]
    fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (**self).as_any().downcast_ref::<T>()
    }
}
