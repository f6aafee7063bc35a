pub mod config;
pub mod files;
pub mod storage;

pub use config::{load_config, save_config, Config};
pub use files::{
    atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_file, report_file,
};
pub use storage::{load_and_persist, JsonFileStorage, StateStorage, STATE_KEY};
