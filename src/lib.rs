pub mod executor;
pub mod license_file;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod traits;

// Re-export common types for convenience
pub use executor::*;
pub use license_file::DefaultLicenseFileClassifier;
pub use logging::init_tracing;
pub use matcher::{
    DefinitionPolicy, FileProperty, HarvestPolicy, LicenseMatcher, PropertyPath,
    CLEARLYDEFINED_TOOL,
};
pub use model::*;
pub use traits::*;
