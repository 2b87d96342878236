mod load;
mod types;

pub use load::{load, load_from_str, resolve_config_path};
pub use types::*;
