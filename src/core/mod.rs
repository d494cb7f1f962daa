pub mod cancel;
pub mod config;
pub mod log;
pub mod observer;
pub mod remove;
pub mod start;
pub mod stop;
