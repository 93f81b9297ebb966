use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    pub max_execution_time: u32,
    pub memory_limit: String,
    pub upload_max_filesize: String,
    pub post_max_size: String,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_execution_time: 90,
            memory_limit: "600M".to_string(),
            upload_max_filesize: "200M".to_string(),
            post_max_size: "200M".to_string(),
        }
    }
}
