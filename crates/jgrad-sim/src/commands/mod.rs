use std::error::Error;

use jgrad_pipeline::to_canonical_json_bytes;
use serde::Serialize;

pub mod aggregate;
pub mod decode;
pub mod encode;
pub mod estimate;
pub mod program;
pub mod verify;
pub mod version;

pub(crate) fn print_canonical<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let json = to_canonical_json_bytes(value).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
