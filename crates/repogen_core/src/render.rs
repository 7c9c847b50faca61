//! Per-entity binding renderer.
//!
//! # Responsibility
//! - Substitute the generation model into the fixed binding skeleton.
//!
//! # Invariants
//! - Rendering is mechanical: the only iteration is over the field list.
//! - A failed render produces no output at all; emission is the caller's
//!   single write.

use crate::ir::QueryModel;
use crate::schema::FieldSpec;
use convert_case::{Case, Casing};
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering error for field shapes the skeleton cannot express.
#[derive(Debug)]
pub enum RenderError {
    /// The resolved scalar type is not a parseable Rust type.
    UnrenderableType { field: String, rust_type: String },
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrenderableType { field, rust_type } => write!(
                f,
                "field `{field}` has unrenderable scalar type `{rust_type}`"
            ),
        }
    }
}

impl Error for RenderError {}

const HEADER: &str = "// Code generated by repogen. Do not edit.";

/// Renders the complete generated source for one entity.
pub fn render_entity(model: &QueryModel) -> RenderResult<String> {
    let tokens = binding_tokens(model)?;
    Ok(format!("{HEADER}\n\n{tokens}\n"))
}

fn binding_tokens(model: &QueryModel) -> RenderResult<TokenStream> {
    let entity = format_ident!("{}", model.entity);
    let table = &model.table;
    let columns = model.fields.iter().map(|field| field.column.as_str());

    let scan_fields = model.fields.iter().enumerate().map(|(idx, field)| {
        let name = format_ident!("{}", field.name);
        let idx = Literal::usize_unsuffixed(idx);
        quote! { #name: row.get(#idx)?, }
    });

    let insert_values = model.creatable_fields().iter().map(|field| {
        let name = format_ident!("{}", field.name);
        quote! { self.#name.clone().into(), }
    });

    let mut field_consts = TokenStream::new();
    for field in &model.fields {
        field_consts.extend(field_const(field)?);
    }

    let repo_alias = format_ident!("{}Repo", model.entity);
    let new_fn = format_ident!("new_{}_repo", model.entity.to_case(Case::Snake));

    Ok(quote! {
        use repogen_core::query::Field;
        use repogen_core::repo::{Entity, SqliteRepository};
        use rusqlite::types::Value;
        use rusqlite::{Connection, Row};

        impl Entity for #entity {
            const TABLE: &'static str = #table;
            const COLUMNS: &'static [&'static str] = &[#(#columns),*];

            fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
                Ok(Self {
                    #(#scan_fields)*
                })
            }

            fn insert_args(&self) -> Vec<Value> {
                vec![#(#insert_values)*]
            }
        }

        pub type #repo_alias<'conn> = SqliteRepository<'conn, #entity>;

        pub fn #new_fn(conn: &mut Connection) -> #repo_alias<'_> {
            SqliteRepository::new(conn)
        }

        #field_consts
    })
}

fn field_const(field: &FieldSpec) -> RenderResult<TokenStream> {
    let const_ident = format_ident!("{}", field.name.to_case(Case::Constant));
    let column = &field.column;
    let scalar: syn::Type =
        syn::parse_str(&field.rust_type).map_err(|_| RenderError::UnrenderableType {
            field: field.name.clone(),
            rust_type: field.rust_type.clone(),
        })?;
    Ok(quote! {
        pub const #const_ident: Field<#scalar> = Field::new(#column);
    })
}
