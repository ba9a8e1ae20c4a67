use std::convert::Infallible;

use dicon::prelude::*;

pub struct Test1;

#[component]
impl Test1 {
    #[construct]
    pub fn new() -> Self {
        todo!()
    }
}

pub struct Test2;

#[component]
impl Test2 {
    #[construct]
    pub fn new() -> Test2 {
        todo!()
    }
}

pub struct Test3;

#[component]
impl Test3 {
    #[construct]
    pub fn new() -> Result<Self, Infallible> {
        todo!()
    }
}

pub struct Test4;

#[component]
impl Test4 {
    #[construct]
    pub fn new(_container: &Container) -> Result<Test4, ContainerError> {
        todo!()
    }
}

pub struct Test5;

#[component]
impl Test5 {
    #[construct]
    pub fn new() -> std::result::Result<Test5, std::io::Error> {
        todo!()
    }
}

#[derive(Default)]
pub struct Test6;

#[component]
impl Test6 {}

fn main() {}
