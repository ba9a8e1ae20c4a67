use std::sync::Arc;

use dicon::prelude::*;

pub trait Reader: Send + Sync {
    fn read(&self) -> u8;
}

pub trait Writer: Send + Sync {
    fn write(&self, byte: u8);
}

#[derive(Default)]
pub struct Buffer;

impl Reader for Buffer {
    fn read(&self) -> u8 {
        0
    }
}

impl Writer for Buffer {
    fn write(&self, _byte: u8) {}
}

#[component(dyn Reader, dyn Writer, Buffer)]
impl Buffer {
    pub fn len(&self) -> usize {
        0
    }
}

pub struct Wrapper<T> {
    inner: T,
}

impl<T> Reader for Wrapper<T>
where
    T: Reader,
{
    fn read(&self) -> u8 {
        self.inner.read()
    }
}

#[component(dyn Reader)]
impl<T> Wrapper<T>
where
    T: Reader + Default + 'static,
{
    #[construct]
    fn new() -> Self {
        Self {
            inner: T::default(),
        }
    }
}

fn main() {
    let container = Container::new();
    container.register_transient::<dyn Reader, Buffer>("").unwrap();
    container.register_transient::<dyn Writer, Buffer>("").unwrap();
    container.register_transient::<Buffer, Buffer>("").unwrap();
    container
        .register_singleton::<dyn Reader, Wrapper<Buffer>>("wrapped")
        .unwrap();

    let reader: Arc<dyn Reader> = container.resolve_transient("").unwrap();
    assert_eq!(reader.read(), 0);
    assert_eq!(container.resolve_transient::<Buffer>("").unwrap().len(), 0);
}
