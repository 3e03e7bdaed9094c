//! Configuration data types

pub mod app;
pub mod container;
pub mod logging;
pub mod scan;

pub use app::AppConfig;
pub use container::ContainerConfig;
pub use logging::LoggingConfig;
pub use scan::ScanConfig;
