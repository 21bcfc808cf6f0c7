use std::error::Error;

use clap::Args;
use jgrad_core::SchemaVersion;
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including the payload schema version.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    schema_version: SchemaVersion,
    crates: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        schema_version: SchemaVersion::default(),
        crates: ["jgrad-core", "jgrad-codec", "jgrad-pipeline"]
            .into_iter()
            .map(String::from)
            .collect(),
    };
    print_canonical(&info)
}
