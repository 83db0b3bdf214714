// Record Merge - Core Library
// Fetches two customer CSVs from WebHDFS, merges them by Customer Id,
// and writes one consolidated CSV.

pub mod error;
pub mod record;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod merger;
pub mod serializer;
pub mod orchestrator;

// Re-export commonly used types
pub use error::{MergeError, Result};
pub use record::{Record, COLUMNS, ID_COLUMN};
pub use config::Config;
pub use fetcher::{RemoteStore, WebHdfsClient, authorization_header, open_url};
pub use parser::parse_records;
pub use merger::{merge, EmptyIdPolicy, MergeEngine, MergeOutcome, MergeReport};
pub use serializer::serialize_records;
pub use orchestrator::{run, RunSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
