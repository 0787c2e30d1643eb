//! End-to-end preprocessing flow: load, validate, fix, re-validate, write.
//!
//! Progress is reported on stdout with one glyph-prefixed line per step so
//! runs are easy to follow in CI logs. The corrected document is written
//! only when the final validation finds no remaining violations.

use crate::schema::patch::{Fix, Violation, fix_invalid_schemas, fix_none_typed_ids, validate_schemas};

use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure modes of the preprocessing flow itself.
///
/// Unresolved validation failures are not errors but an
/// [`Outcome::Incomplete`], so the caller decides the exit status.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Input file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON", .path.display())]
    FileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize the corrected document")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a preprocessing run produced.
#[derive(Debug)]
pub enum Outcome {
    /// Every violation was resolved and the corrected document was written.
    Written { path: PathBuf },
    /// Violations survived both fix passes; nothing was written.
    Incomplete { violations: Vec<Violation> },
}

/// Fix the spec document at `input`, writing the corrected document to
/// `output` only if it validates afterwards. Overwrites `output` if present.
pub fn preprocess_spec(input: &Path, output: &Path) -> Result<Outcome, PatchError> {
    if !input.exists() {
        return Err(PatchError::NotFound(input.to_path_buf()));
    }

    println!("▶ Preprocessing OpenAPI spec: {}", input.display());

    let text = fs::read_to_string(input).map_err(|source| PatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&text).map_err(|source| PatchError::FileFormat {
        path: input.to_path_buf(),
        source,
    })?;

    if doc.get("components").and_then(|c| c.get("schemas")).is_none() {
        debug!("document has no components.schemas; nothing to fix");
    }

    println!("▶ Validating input spec...");
    let before = validate_schemas(&doc);
    for violation in &before {
        println!("✗ {}", violation);
    }
    if before.is_empty() {
        println!("✓ Input spec appears valid");
    } else {
        println!("⚠ Input spec has invalid schemas - attempting fixes...");
    }

    let (doc, fixes) = fix_none_typed_ids(doc);
    report_fixes(&fixes);
    let (doc, fixes) = fix_invalid_schemas(doc);
    report_fixes(&fixes);

    println!("▶ Validating output spec...");
    let after = validate_schemas(&doc);
    if !after.is_empty() {
        for violation in &after {
            println!("✗ {}", violation);
        }
        println!("✗ Output spec still has issues!");
        return Ok(Outcome::Incomplete { violations: after });
    }
    println!("✓ Output spec is valid");

    let pretty = serde_json::to_string_pretty(&doc).map_err(PatchError::Serialize)?;
    fs::write(output, pretty).map_err(|source| PatchError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    println!("✔ Preprocessed spec written to: {}", output.display());

    Ok(Outcome::Written {
        path: output.to_path_buf(),
    })
}

fn report_fixes(fixes: &[Fix]) {
    for fix in fixes {
        println!(
            "✓ Fixed {}.{} from literal None to nullable string",
            fix.schema, fix.property
        );
    }
}
