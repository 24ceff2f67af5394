//! `printmatch decode`: show the SKU prefix each file name carries.
//!
//! A name without a prefix is a normal outcome, not an error.

use serde::Serialize;

use printmatch_core::domain::decode;

use crate::{cli::DecodeArgs, error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
struct Decoded {
    file_name: String,
    sku: Option<String>,
    artwork_code: Option<String>,
    product_type_code: Option<String>,
    fields: Vec<String>,
    reason: Option<String>,
}

fn decode_one(file_name: &str) -> Decoded {
    match decode(file_name) {
        Ok(fragment) => Decoded {
            file_name: file_name.to_owned(),
            sku: Some(fragment.prefix().to_string()),
            artwork_code: Some(fragment.artwork_code().to_string()),
            product_type_code: Some(fragment.product_type_code().to_string()),
            fields: fragment
                .prefix()
                .fields()
                .iter()
                .map(ToString::to_string)
                .collect(),
            reason: None,
        },
        Err(reason) => Decoded {
            file_name: file_name.to_owned(),
            sku: None,
            artwork_code: None,
            product_type_code: None,
            fields: Vec::new(),
            reason: Some(reason.to_string()),
        },
    }
}

pub fn execute(args: DecodeArgs, output: OutputManager) -> CliResult<()> {
    let decoded: Vec<Decoded> = args.file_names.iter().map(|n| decode_one(n)).collect();

    if output.is_json() {
        output.json(&decoded)?;
        return Ok(());
    }

    for row in &decoded {
        match (&row.sku, &row.reason) {
            (Some(sku), _) => output.success(&format!(
                "{} \u{2192} {} (depth {})",
                row.file_name,
                sku,
                row.fields.len()
            ))?,
            (None, Some(reason)) => {
                output.warning(&format!("{}: no SKU prefix ({reason})", row.file_name))?
            }
            (None, None) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_row_lists_fields() {
        let row = decode_one("renders/11K001-UTS-01-02.png");
        assert_eq!(row.sku.as_deref(), Some("11K001-UTS-01-02"));
        assert_eq!(row.fields, vec!["01", "02"]);
        assert!(row.reason.is_none());
    }

    #[test]
    fn undecodable_row_keeps_reason() {
        let row = decode_one("final-artwork.png");
        assert!(row.sku.is_none());
        assert!(row.reason.is_some());
    }
}
