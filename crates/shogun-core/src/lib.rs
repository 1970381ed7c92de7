pub mod config;
pub mod dashboard;
pub mod error;
pub mod heading;
pub mod pane;
pub mod report;
pub mod sections;
pub mod table;

pub use dashboard::{parse, parse_file};
pub use error::{DashboardError, Result};
pub use report::Report;
