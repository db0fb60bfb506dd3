//! # girstub Schema
//!
//! GObject Introspection (GIR) XML parser and type definitions.
//!
//! This crate provides:
//! - GIR repository parsing
//! - Type definitions for the repository elements stubs are built from
//! - Repository validation
//! - Intermediate representation for stub generation

pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{StubIr, py_type};
pub use parser::{ParseOptions, parse_repository, parse_repository_with};
pub use types::{
    AliasDef, CallableDef, CallableKind, ClassDef, ClassKind, ConstantDef, EnumDef, EnumKind,
    EnumMember, Include, Namespace, ParamDef, ParamKind, Repository, TypeRef,
};
pub use validation::validate_repository;
