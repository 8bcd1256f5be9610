pub mod codec;
pub mod config;
pub mod error;
pub mod ident;

pub use codec::{compress, decompress};
pub use config::{ImgvaultConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use ident::{IdentifierError, TableName};
