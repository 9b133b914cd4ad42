pub mod config;
pub mod logging;

pub mod fetcher;
pub mod login;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod url_model;
pub mod walker;
