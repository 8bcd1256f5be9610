//! imgvault-store: storage drivers for the image table
//!
//! Defines the driver contract, the registry that maps driver kinds to
//! connect functions, and the Postgres implementation.

pub mod driver;
pub mod postgres;
pub mod registry;

pub use driver::{DeleteOutcome, FetchedImage, ImageDriver, ImageRecord};
pub use postgres::PostgresDriver;
pub use registry::{DriverKind, DriverRegistry};
