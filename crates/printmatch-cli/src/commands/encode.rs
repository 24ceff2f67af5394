//! `printmatch encode`: build a SKU from its parts.

use serde_json::json;
use tracing::instrument;

use printmatch_core::{domain::Sku, error::PrintMatchError};

use crate::{cli::EncodeArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(artwork = %args.artwork, product_type = %args.product_type))]
pub fn execute(args: EncodeArgs, output: OutputManager) -> CliResult<()> {
    let codes: Vec<&str> = args.codes.iter().map(String::as_str).collect();
    let sku = Sku::encode(&args.artwork, &args.product_type, &codes).map_err(PrintMatchError::from)?;

    if output.is_json() {
        output.json(&json!({ "sku": sku }))?;
    } else {
        output.print(&sku)?;
    }
    Ok(())
}
