//! Intermediate representation for stub generation.
//!
//! This module provides a flattened, resolved representation of a GIR
//! repository in which every name, type and value is already in its Python
//! spelling.

use crate::types::{
    CallableDef, CallableKind, ClassDef, ConstantDef, EnumDef, EnumKind, ParamDef, ParamKind,
    Repository, TypeRef,
};
use std::collections::BTreeMap;

/// Intermediate representation of a repository for stub generation.
#[derive(Debug, Clone)]
pub struct StubIr {
    /// Namespace name.
    pub namespace: String,
    /// Namespace version.
    pub version: Option<String>,
    /// Modules imported from `gi.repository`.
    pub imports: Vec<String>,
    /// Module-level constants in document order.
    pub constants: Vec<ResolvedConstant>,
    /// Classes and enums keyed (and therefore ordered) by name.
    pub types: BTreeMap<String, ResolvedType>,
    /// Module-level functions in document order.
    pub functions: Vec<ResolvedCallable>,
}

impl StubIr {
    /// Creates an intermediate representation from a parsed repository.
    #[must_use]
    pub fn from_repository(repository: &Repository) -> Self {
        let namespace = &repository.namespace;
        let mut ir = Self {
            namespace: namespace.name.clone(),
            version: namespace.version.clone(),
            imports: repository.include_names(),
            constants: Vec::new(),
            types: BTreeMap::new(),
            functions: Vec::new(),
        };

        for constant in &namespace.constants {
            ir.constants.push(ResolvedConstant::from_constant(constant));
        }

        let mut types: Vec<(usize, ResolvedType)> = namespace
            .classes
            .iter()
            .map(|c| (c.position, ResolvedType::Class(ResolvedClass::from_class(c))))
            .chain(
                namespace
                    .enums
                    .iter()
                    .map(|e| (e.position, ResolvedType::Enum(ResolvedEnum::from_enum(e)))),
            )
            .collect();
        types.sort_by_key(|(position, _)| *position);

        for (_, resolved) in types {
            ir.insert_type(resolved);
        }

        for function in &namespace.functions {
            ir.functions
                .push(ResolvedCallable::from_callable(function, None));
        }

        ir
    }

    /// Gets a resolved type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&ResolvedType> {
        self.types.get(name)
    }

    /// Inserts a type; a later definition replaces an earlier one.
    fn insert_type(&mut self, resolved: ResolvedType) {
        let name = resolved.name().to_string();
        if self.types.insert(name.clone(), resolved).is_some() {
            tracing::warn!(
                namespace = %self.namespace,
                "duplicate type '{}', keeping the last definition",
                name
            );
        }
    }
}

/// Resolved class or enum.
#[derive(Debug, Clone)]
pub enum ResolvedType {
    /// Class or interface.
    Class(ResolvedClass),
    /// Enumeration or bitfield.
    Enum(ResolvedEnum),
}

impl ResolvedType {
    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Enum(e) => &e.name,
        }
    }
}

/// Resolved class or interface.
#[derive(Debug, Clone)]
pub struct ResolvedClass {
    /// Class name.
    pub name: String,
    /// Base classes: the parent followed by implemented interfaces.
    pub bases: Vec<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Callables in document order.
    pub methods: Vec<ResolvedCallable>,
}

impl ResolvedClass {
    /// Creates a resolved class from a class definition.
    #[must_use]
    pub fn from_class(class: &ClassDef) -> Self {
        let bases = class
            .parent
            .iter()
            .chain(class.implements.iter())
            .cloned()
            .collect();

        let methods = class
            .methods
            .iter()
            .map(|m| ResolvedCallable::from_callable(m, Some(&class.name)))
            .collect();

        Self {
            name: class.name.clone(),
            bases,
            doc: class.doc.clone(),
            methods,
        }
    }
}

/// Resolved function or method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCallable {
    /// Python name.
    pub name: String,
    /// Whether the callable is emitted as a `@staticmethod`.
    pub is_static: bool,
    /// Rendered parameters, e.g. `self` or `title: str`.
    pub parameters: Vec<String>,
    /// Rendered return annotation.
    pub return_type: String,
    /// Documentation text.
    pub doc: Option<String>,
}

impl ResolvedCallable {
    /// Creates a resolved callable.
    ///
    /// `owner` is the enclosing class name for class members, `None` for
    /// namespace-level functions. Constructors return their owner.
    #[must_use]
    pub fn from_callable(callable: &CallableDef, owner: Option<&str>) -> Self {
        let is_static = owner.is_some()
            && matches!(
                callable.kind,
                CallableKind::Constructor | CallableKind::Function
            );

        let return_type = match (callable.kind, owner) {
            (CallableKind::Constructor, Some(owner)) => py_type(Some(owner)),
            _ => callable
                .return_type
                .as_ref()
                .map_or_else(|| py_type(None), py_type_ref),
        };

        Self {
            name: py_identifier(&callable.name),
            is_static,
            parameters: callable.parameters.iter().map(render_param).collect(),
            return_type,
            doc: callable.doc.clone(),
        }
    }
}

/// Python base class of a generated enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumBase {
    /// `enum.Enum`.
    Enum,
    /// `enum.IntFlag`.
    IntFlag,
}

impl EnumBase {
    /// Returns the Python class name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enum => "Enum",
            Self::IntFlag => "IntFlag",
        }
    }
}

/// Resolved enumeration or bitfield.
#[derive(Debug, Clone)]
pub struct ResolvedEnum {
    /// Enum name.
    pub name: String,
    /// Python base class.
    pub base: EnumBase,
    /// Documentation text.
    pub doc: Option<String>,
    /// Members in document order.
    pub members: Vec<ResolvedMember>,
}

impl ResolvedEnum {
    /// Creates a resolved enum from an enum definition.
    #[must_use]
    pub fn from_enum(enum_def: &EnumDef) -> Self {
        let base = match enum_def.kind {
            EnumKind::Enumeration => EnumBase::Enum,
            EnumKind::Bitfield => EnumBase::IntFlag,
        };

        let members = enum_def
            .members
            .iter()
            .map(|m| ResolvedMember {
                name: py_constant_name(&m.name),
                value: m.value.clone(),
                doc: m.doc.clone(),
            })
            .collect();

        Self {
            name: enum_def.name.clone(),
            base,
            doc: enum_def.doc.clone(),
            members,
        }
    }
}

/// Resolved enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Upper-case Python name.
    pub name: String,
    /// Value literal.
    pub value: String,
    /// Documentation text.
    pub doc: Option<String>,
}

/// Resolved module-level constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConstant {
    /// Upper-case Python name.
    pub name: String,
    /// Python literal.
    pub value: String,
    /// Documentation text.
    pub doc: Option<String>,
}

impl ResolvedConstant {
    /// Creates a resolved constant from a constant definition.
    #[must_use]
    pub fn from_constant(constant: &ConstantDef) -> Self {
        let value = match constant.type_ref.name() {
            Some("utf8" | "filename") => py_string_literal(&constant.value),
            Some("gboolean") => match constant.value.as_str() {
                "true" | "TRUE" | "1" => "True".to_string(),
                _ => "False".to_string(),
            },
            _ => constant.value.clone(),
        };

        Self {
            name: py_constant_name(&constant.name),
            value,
            doc: constant.doc.clone(),
        }
    }
}

/// Maps a GIR type name to its Python annotation.
///
/// Unknown names become quoted forward references.
#[must_use]
pub fn py_type(gir_type: Option<&str>) -> String {
    let Some(gir_type) = gir_type else {
        return "None".to_string();
    };
    match gir_type {
        "none" => "None".to_string(),
        "gboolean" => "bool".to_string(),
        "gint" | "guint" | "guint32" | "gsize" | "gssize" => "int".to_string(),
        "gfloat" | "gdouble" => "float".to_string(),
        "utf8" => "str".to_string(),
        "gpointer" => "object".to_string(),
        other => format!("'{other}'"),
    }
}

/// Maps a type reference to its Python annotation.
#[must_use]
pub fn py_type_ref(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Named(name) => py_type(Some(name.as_str())),
        TypeRef::Array(Some(element)) => format!("List[{}]", py_type(Some(element.as_str()))),
        TypeRef::Array(None) => "List[object]".to_string(),
        TypeRef::Varargs | TypeRef::Missing => "object".to_string(),
    }
}

/// Renders one parameter of a signature.
fn render_param(param: &ParamDef) -> String {
    if param.kind == ParamKind::Instance {
        "self".to_string()
    } else if param.is_varargs() {
        "*args".to_string()
    } else {
        format!(
            "{}: {}",
            py_identifier(&param.name),
            py_type_ref(&param.type_ref)
        )
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Returns true if `name` is a reserved Python keyword.
#[must_use]
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Converts a GIR identifier to a valid Python identifier.
///
/// Keywords get a trailing underscore, leading digits a leading one.
#[must_use]
pub fn py_identifier(name: &str) -> String {
    if is_python_keyword(name) {
        format!("{name}_")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Converts a member or constant name to its upper-case Python spelling.
#[must_use]
pub fn py_constant_name(name: &str) -> String {
    py_identifier(&name.to_uppercase())
}

/// Renders a Python string literal.
#[must_use]
pub fn py_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
