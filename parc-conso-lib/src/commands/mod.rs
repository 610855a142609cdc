//! Command-line interface and orchestration for parc-conso
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **merge**: Load CSV files, ZIP archives and directories, concatenate every table
//!   into one sheet and add the monthly data consumption summary when the merged data
//!   holds the consumption columns
//! - **conso**: Load every export in a folder and write only the consumption summary
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The merge and conso commands:
//!
//! 1. Initialize logging and load configuration
//! 2. Discover and read the sources, collecting per-source failures
//! 3. Merge the tables and summarize consumption
//! 4. Write the workbook
//!
//! Per-source failures and dropped rows are reported on the host's error stream;
//! only the absence of any readable source fails the command.

mod common;
mod config;
mod conso;
mod host;
mod init;
mod merge;
mod run;

pub use common::{GlobalArgs, LogLevel, init_logging};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use conso::{ConsoArgs, process_conso};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use init::{InitArgs, init_config};
pub use merge::{MergeArgs, process_merge};
pub use run::run;
