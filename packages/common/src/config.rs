use std::path::PathBuf;

use serde::Deserialize;

/// Avatar file storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding avatar files. Default: "./avatars".
    #[serde(default = "default_avatars_dir")]
    pub avatars_dir: PathBuf,
    /// Largest accepted avatar in bytes. Default: 5 MiB.
    #[serde(default = "default_max_avatar_size")]
    pub max_avatar_size: u64,
    /// Buffer size used when copying uploads to disk. Default: 1024.
    #[serde(default = "default_copy_buffer_size")]
    pub copy_buffer_size: usize,
}

fn default_avatars_dir() -> PathBuf {
    PathBuf::from("./avatars")
}
fn default_max_avatar_size() -> u64 {
    5 * 1024 * 1024
}
fn default_copy_buffer_size() -> usize {
    1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            avatars_dir: default_avatars_dir(),
            max_avatar_size: default_max_avatar_size(),
            copy_buffer_size: default_copy_buffer_size(),
        }
    }
}
