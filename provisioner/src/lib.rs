pub mod catalog;
pub mod provision;
pub mod remote;
pub mod utils;

pub use crate::catalog::{builtin_catalog, Catalog, SizePolicy};
pub use crate::provision::{PacingPolicy, ProvisionReport, Provisioner};
pub use crate::remote::{AppwriteClient, SchemaApi};
pub use crate::utils::{AppError, Result};
