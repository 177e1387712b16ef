pub mod cli;
pub mod fetch_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_input_file, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "doi-prefixes")]
#[command(about = "Print the DOI prefixes of a saved DataCite /prefixes response, one per line")]
pub struct CliConfig {
    /// JSON file saved from the DataCite REST API
    pub rest_prefixes_json_file: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_input_file("rest_prefixes_json_file", &self.rest_prefixes_json_file)
    }
}
