use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a live record's payload to stdout (exit code 1 on a miss)
    Get {
        /// Cache key
        key: String,
    },
    /// Store a record
    Set {
        /// Cache key
        key: String,
        /// Payload; read from stdin when neither this nor --file is given
        #[arg(conflicts_with = "file")]
        value: Option<String>,
        /// Read the payload from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Time to live in seconds
        #[arg(long, default_value = "300")]
        ttl: u64,
    },
    /// Delete a record
    Remove {
        /// Cache key
        key: String,
    },
    /// Print the file a key is stored in
    Locate {
        /// Cache key
        key: String,
    },
    /// Show why a key hits or misses
    Inspect {
        /// Cache key
        key: String,
    },
    /// Run one vacuum sweep and print the report as JSON
    Vacuum,
}
