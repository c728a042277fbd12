pub mod demo;
pub mod relay;
pub mod upstream;
