pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, fetch_config::FetchConfig, CliConfig};
pub use core::{emitter::LineEmitter, fetcher::PageFetcher, lexicon::PrefixLexicon};
pub use utils::error::{PrefixError, Result};
