pub mod config;
pub mod constants;
pub mod import;
pub mod lang;
pub mod logging;
pub mod seed;
pub mod services;
pub mod session;
pub mod store;
pub mod study;
pub mod sync;
