//! Generation pipeline: declaration → schema → model → rendered binding.
//!
//! # Responsibility
//! - Drive one generation run end to end and emit the output file.
//!
//! # Invariants
//! - Emission is all-or-nothing: the binding is rendered fully in memory
//!   and written with a single call; failures leave no partial file.
//! - An absent entity or one without persisted fields is a silent no-op.

use crate::ir::QueryModel;
use crate::render::{render_entity, RenderError};
use crate::schema::{extract_schema, SchemaError};
use log::{error, info};
use std::error::Error;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File-name suffix appended to the source stem for generated bindings.
const GENERATED_SUFFIX: &str = "_repo.rs";

pub type GenResult<T> = Result<T, GenError>;

/// Generation-run error.
#[derive(Debug)]
pub enum GenError {
    Schema(SchemaError),
    Render(RenderError),
    Io(io::Error),
}

impl Display for GenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<SchemaError> for GenError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<RenderError> for GenError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<io::Error> for GenError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Generates the binding source text for `entity` from in-memory source.
///
/// Returns `Ok(None)` when there is nothing to generate.
pub fn generate_source(source: &str, entity: &str) -> GenResult<Option<String>> {
    let Some(schema) = extract_schema(source, entity)? else {
        return Ok(None);
    };
    let model = QueryModel::from_schema(&schema);
    let rendered = render_entity(&model)?;
    Ok(Some(rendered))
}

/// Runs one generation pass over a source file.
///
/// On success the binding is written next to the source as
/// `<stem>_repo.rs` and its path is returned. Returns `Ok(None)` without
/// writing anything when the entity is absent or has no persisted fields.
pub fn generate_file(src: &Path, entity: &str) -> GenResult<Option<PathBuf>> {
    let started_at = Instant::now();
    info!(
        "event=generate module=generate status=start entity={} src={}",
        entity,
        src.display()
    );

    let run = || -> GenResult<Option<PathBuf>> {
        let source = fs::read_to_string(src)?;
        let Some(rendered) = generate_source(&source, entity)? else {
            return Ok(None);
        };
        let out = output_path(src);
        fs::write(&out, rendered)?;
        Ok(Some(out))
    };

    match run() {
        Ok(Some(out)) => {
            info!(
                "event=generate module=generate status=ok entity={} out={} duration_ms={}",
                entity,
                out.display(),
                started_at.elapsed().as_millis()
            );
            Ok(Some(out))
        }
        Ok(None) => {
            info!(
                "event=generate module=generate status=skip entity={} reason=not_persisted duration_ms={}",
                entity,
                started_at.elapsed().as_millis()
            );
            Ok(None)
        }
        Err(err) => {
            error!(
                "event=generate module=generate status=error entity={} duration_ms={} error={}",
                entity,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Output path convention: the source stem plus the generated suffix, in
/// the source file's directory.
pub fn output_path(src: &Path) -> PathBuf {
    let stem = src
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("generated");
    src.with_file_name(format!("{stem}{GENERATED_SUFFIX}"))
}
