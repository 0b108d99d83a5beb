pub mod config;
pub mod logging;

pub mod downloader;
pub mod fetch;
pub mod filename;
pub mod headers;
pub mod storage;
pub mod url_list;
