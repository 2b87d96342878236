pub mod fs;
pub mod http;

pub use fs::FsDataSource;
pub use http::HttpDataSource;
