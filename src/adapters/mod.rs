// Adapters layer: concrete implementations of the domain ports.

pub mod bluetooth;
pub mod ping;
pub mod process;
