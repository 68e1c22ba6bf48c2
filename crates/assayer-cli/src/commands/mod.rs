//! Command implementations.

pub mod config;
pub mod run;
pub mod scan;
pub mod validate;

pub use self::config::execute_config;
pub use self::run::execute_run;
pub use self::scan::execute_scan;
pub use self::validate::execute_validate;
