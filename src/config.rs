// ⚙️ Configuration - where the inputs live and where the result goes
//
// Defaults match the historical fixed setup: a local WebHDFS namenode at
// http://localhost:9870/, user `adil`, both inputs under /user, and the
// result written to updated_Records.csv in the current directory.
// The binary fills this from flags with RECORD_MERGE_* env fallbacks (cli.rs).

use crate::error::{MergeError, Result};
use crate::merger::EmptyIdPolicy;
use crate::record::ID_COLUMN;
use reqwest::Url;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_ADDRESS: &str = "http://localhost:9870/";
pub const DEFAULT_USERNAME: &str = "adil";
pub const DEFAULT_DIRECTORY: &str = "/user";
pub const DEFAULT_BASE_FILE: &str = "customer.csv";
pub const DEFAULT_INCOMING_FILE: &str = "latest-customer.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "updated_Records.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the remote store, e.g. `http://namenode:9870/`
    pub base_address: String,
    pub username: String,
    /// Secret paired with `username`. Without it the legacy username-only
    /// Authorization header is sent.
    pub token: Option<SecretString>,
    /// Remote directory holding both input files
    pub directory: String,
    pub base_file_name: String,
    pub incoming_file_name: String,
    /// Local output file; relative paths resolve against the current directory
    pub output_path: PathBuf,
    /// Input header carrying the identifier
    pub id_column: String,
    /// Transport deadline per request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub empty_id_policy: EmptyIdPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            token: None,
            directory: DEFAULT_DIRECTORY.to_string(),
            base_file_name: DEFAULT_BASE_FILE.to_string(),
            incoming_file_name: DEFAULT_INCOMING_FILE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            id_column: ID_COLUMN.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            empty_id_policy: EmptyIdPolicy::default(),
        }
    }
}

impl Config {
    /// Remote path of a file inside `directory`, always starting with `/`
    pub fn remote_path(&self, file_name: &str) -> String {
        let dir = self.directory.trim_matches('/');
        let file = file_name.trim_start_matches('/');
        if dir.is_empty() {
            format!("/{file}")
        } else {
            format!("/{dir}/{file}")
        }
    }

    pub fn base_path(&self) -> String {
        self.remote_path(&self.base_file_name)
    }

    pub fn incoming_path(&self) -> String {
        self.remote_path(&self.incoming_file_name)
    }

    /// Check everything that can be checked without touching the network
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_address).map_err(|e| {
            MergeError::Config(format!("base address '{}': {e}", self.base_address))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MergeError::Config(format!(
                "base address '{}' must use http or https",
                self.base_address
            )));
        }

        if self.username.trim().is_empty() {
            return Err(MergeError::Config("username must not be empty".to_string()));
        }

        for (label, name) in [
            ("base file name", &self.base_file_name),
            ("incoming file name", &self.incoming_file_name),
            ("identifier column", &self.id_column),
        ] {
            if name.trim().is_empty() {
                return Err(MergeError::Config(format!("{label} must not be empty")));
            }
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(MergeError::Config("output path must not be empty".to_string()));
        }

        Ok(())
    }
}
