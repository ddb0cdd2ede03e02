pub mod backend;
pub mod chrome;

pub use backend::{DriverError, DriverResult, MockPage, PageCall, PageDriver};
pub use chrome::{ChromeConfig, ChromePage};
