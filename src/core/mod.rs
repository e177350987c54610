pub mod connection;
pub mod inventory;
pub mod parser;
pub mod scanner;
pub mod workflow;

pub use crate::domain::catalog::NetworkCatalog;
pub use crate::domain::model::{NetworkDescriptor, ParseSignal, RawNode};
pub use crate::domain::ports::{ConfigProvider, ProcessRunner};
pub use crate::utils::error::Result;
