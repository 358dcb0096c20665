use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Storage
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// S3 bucket holding uploaded document blobs. When unset the gateway
    /// falls back to an in-memory object store (dev mode — uploads are
    /// lost on restart).
    #[serde(default)]
    pub bucket: Option<String>,
    /// AWS region override. When unset, resolved from the environment the
    /// usual SDK way (AWS_REGION, profile, IMDS).
    #[serde(default)]
    pub region: Option<String>,
    /// Directory for the JSON-backed document and suggestion repositories.
    #[serde(default = "d_state_path")]
    pub state_path: PathBuf,
    /// Lifetime of presigned download links, in seconds.
    #[serde(default = "d_60")]
    pub presign_expiry_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: None,
            state_path: d_state_path(),
            presign_expiry_secs: 60,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_state_path() -> PathBuf {
    PathBuf::from("./data")
}
fn d_60() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_config_empty_toml_uses_all_defaults() {
        let cfg: StorageConfig = toml::from_str("").unwrap();
        assert!(cfg.bucket.is_none());
        assert!(cfg.region.is_none());
        assert_eq!(cfg.state_path, PathBuf::from("./data"));
        assert_eq!(cfg.presign_expiry_secs, 60);
    }

    #[test]
    fn storage_config_parses_bucket_and_region() {
        let toml_str = r#"
            bucket = "findoc-documents"
            region = "eu-west-1"
            presign_expiry_secs = 120
        "#;
        let cfg: StorageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.bucket.as_deref(), Some("findoc-documents"));
        assert_eq!(cfg.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cfg.presign_expiry_secs, 120);
    }
}
