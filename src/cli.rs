use clap::{Parser, ValueEnum};
use record_merge::config::{
    Config, DEFAULT_BASE_ADDRESS, DEFAULT_BASE_FILE, DEFAULT_DIRECTORY, DEFAULT_INCOMING_FILE,
    DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME,
};
use record_merge::{EmptyIdPolicy, ID_COLUMN};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

/// How records without a Customer Id are matched
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum EmptyIdArg {
    /// All id-less records share one key
    Collide,
    /// Every id-less incoming record is appended
    Distinct,
}

impl From<EmptyIdArg> for EmptyIdPolicy {
    fn from(arg: EmptyIdArg) -> Self {
        match arg {
            EmptyIdArg::Collide => EmptyIdPolicy::Collide,
            EmptyIdArg::Distinct => EmptyIdPolicy::Distinct,
        }
    }
}

/// Log output format
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum LogFormat {
    Text,
    Json,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge a newer customer CSV from WebHDFS into an existing one."
)]
pub struct Args {
    /// WebHDFS namenode address
    #[arg(long, env = "RECORD_MERGE_BASE_ADDRESS", default_value = DEFAULT_BASE_ADDRESS)]
    pub base_address: String,

    /// User sent in the Authorization header
    #[arg(short, long, env = "RECORD_MERGE_USERNAME", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Secret paired with the username; omit for username-only auth
    #[arg(long, env = "RECORD_MERGE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Remote directory holding both files
    #[arg(short, long, env = "RECORD_MERGE_DIRECTORY", default_value = DEFAULT_DIRECTORY)]
    pub directory: String,

    /// Existing record set, updated in place
    #[arg(long = "base-file", env = "RECORD_MERGE_BASE_FILE", default_value = DEFAULT_BASE_FILE)]
    pub base_file_name: String,

    /// Newer record set whose values win
    #[arg(long = "incoming-file", env = "RECORD_MERGE_INCOMING_FILE", default_value = DEFAULT_INCOMING_FILE)]
    pub incoming_file_name: String,

    /// Local output file (overwritten)
    #[arg(short, long, env = "RECORD_MERGE_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Input header that carries the identifier
    #[arg(long, env = "RECORD_MERGE_ID_COLUMN", default_value = ID_COLUMN)]
    pub id_column: String,

    /// Per-request deadline in seconds; 0 waits forever
    #[arg(long, env = "RECORD_MERGE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Matching rule for records without an identifier
    #[arg(long = "empty-id", env = "RECORD_MERGE_EMPTY_ID", value_enum, default_value = "collide")]
    pub empty_id: EmptyIdArg,

    /// Log output format
    #[arg(long = "log-format", env = "RECORD_MERGE_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            base_address: self.base_address,
            username: self.username,
            token: self.token.filter(|t| !t.is_empty()).map(SecretString::from),
            directory: self.directory,
            base_file_name: self.base_file_name,
            incoming_file_name: self.incoming_file_name,
            output_path: self.output,
            id_column: self.id_column,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
            empty_id_policy: self.empty_id.into(),
        }
    }
}
