//! Declaration parsing and schema extraction.
//!
//! # Responsibility
//! - Locate the requested struct declaration in one source file.
//! - Resolve its table name, persisted fields and scalar types.
//!
//! # Invariants
//! - The table name comes from the first doc-comment line, matching
//!   `<EntityName> <TableName>`.
//! - Fields without a `#[column("...")]` annotation, and fields whose type
//!   shape cannot be resolved, are skipped silently.

use super::{FieldSpec, Schema, SchemaError, SchemaResult};
use once_cell::sync::Lazy;
use regex::Regex;
use syn::{Attribute, Expr, ExprLit, Fields, File, GenericArgument, Item, ItemStruct, Lit, Meta,
    PathArguments, Type};

static TABLE_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s+(\w+)\s*$").expect("valid table comment regex"));

/// Extracts the schema for `entity` from `source`.
///
/// Returns `Ok(None)` when the entity is not declared in the file or has
/// no persisted fields — the caller treats both as a silent no-op. A
/// declared entity without a matching table comment is a fatal
/// configuration error.
pub fn extract_schema(source: &str, entity: &str) -> SchemaResult<Option<Schema>> {
    let file: File = syn::parse_file(source)?;
    let Some(decl) = find_struct(&file, entity) else {
        return Ok(None);
    };
    let table = table_name(decl, entity)?;
    let fields = persisted_fields(decl);
    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(Schema {
        entity: entity.to_string(),
        table,
        fields,
    }))
}

fn find_struct<'a>(file: &'a File, entity: &str) -> Option<&'a ItemStruct> {
    file.items.iter().find_map(|item| match item {
        Item::Struct(decl) if decl.ident == entity => Some(decl),
        _ => None,
    })
}

fn table_name(decl: &ItemStruct, entity: &str) -> SchemaResult<String> {
    let missing = || SchemaError::NoTableComment {
        entity: entity.to_string(),
    };
    let first_line = first_doc_line(&decl.attrs).ok_or_else(missing)?;
    let captures = TABLE_COMMENT_RE.captures(&first_line).ok_or_else(missing)?;
    if &captures[1] != entity {
        return Err(missing());
    }
    Ok(captures[2].to_string())
}

fn first_doc_line(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(text),
                ..
            }) = &meta.value
            {
                return Some(text.value());
            }
        }
    }
    None
}

fn persisted_fields(decl: &ItemStruct) -> Vec<FieldSpec> {
    let Fields::Named(named) = &decl.fields else {
        return Vec::new();
    };
    let mut specs = Vec::new();
    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let Some(column) = column_annotation(&field.attrs) else {
            continue;
        };
        let Some((rust_type, nullable)) = resolve_scalar(&field.ty) else {
            continue;
        };
        specs.push(FieldSpec {
            name: ident.to_string(),
            rust_type,
            column,
            nullable,
        });
    }
    specs
}

fn column_annotation(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        if let Ok(lit) = attr.parse_args::<syn::LitStr>() {
            let column = lit.value();
            if !column.is_empty() {
                return Some(column);
            }
        }
    }
    None
}

/// Resolves a field type to its scalar name.
///
/// Handled shapes: a bare named type, a qualified path type, and either of
/// those behind an `Option` or reference indirection (the indirection is
/// discarded). Anything else yields `None` and the field is skipped.
fn resolve_scalar(ty: &Type) -> Option<(String, bool)> {
    match ty {
        Type::Path(path) if path.qself.is_none() => {
            let segments = &path.path.segments;
            let last = segments.last()?;
            if last.ident == "Option" && segments.len() == 1 {
                let PathArguments::AngleBracketed(args) = &last.arguments else {
                    return None;
                };
                let inner = args.args.iter().find_map(|arg| match arg {
                    GenericArgument::Type(inner) => Some(inner),
                    _ => None,
                })?;
                let (name, _) = resolve_scalar(inner)?;
                return Some((name, true));
            }
            if segments.iter().any(|segment| !segment.arguments.is_empty()) {
                return None;
            }
            let name = segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::");
            Some((name, false))
        }
        Type::Reference(reference) => {
            let (name, _) = resolve_scalar(&reference.elem)?;
            Some((name, false))
        }
        _ => None,
    }
}
