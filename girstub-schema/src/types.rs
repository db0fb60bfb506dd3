//! GIR type definitions.
//!
//! This module contains the data structures representing the parts of a
//! GObject Introspection repository that stub generation consumes:
//! classes, interfaces, callables, enumerations, bitfields and constants.

/// Complete GIR repository definition.
#[derive(Debug, Clone)]
pub struct Repository {
    /// Repository format version (`version` attribute on `<repository>`).
    pub version: Option<String>,
    /// Other repositories this one depends on.
    pub includes: Vec<Include>,
    /// C headers (`<c:include>`).
    pub c_includes: Vec<String>,
    /// pkg-config packages (`<package>`).
    pub packages: Vec<String>,
    /// The namespace described by this repository.
    pub namespace: Namespace,
}

impl Repository {
    /// Creates a repository wrapping the given namespace.
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            version: None,
            includes: Vec::new(),
            c_includes: Vec::new(),
            packages: Vec::new(),
            namespace,
        }
    }

    /// Returns the names of included repositories, in document order and
    /// without duplicates.
    #[must_use]
    pub fn include_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.includes.len());
        for include in &self.includes {
            if !names.contains(&include.name) {
                names.push(include.name.clone());
            }
        }
        names
    }
}

/// Reference to another repository (`<include name=".." version=".."/>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Namespace name, e.g. `Gio`.
    pub name: String,
    /// Namespace version, e.g. `2.0`.
    pub version: Option<String>,
}

impl Include {
    /// Creates a new include.
    #[must_use]
    pub fn new(name: String, version: Option<String>) -> Self {
        Self { name, version }
    }
}

/// GIR namespace (`<namespace>`).
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// Namespace name, e.g. `Gtk`.
    pub name: String,
    /// Namespace version, e.g. `4.0`.
    pub version: Option<String>,
    /// Shared library providing the namespace.
    pub shared_library: Option<String>,
    /// Classes and interfaces.
    pub classes: Vec<ClassDef>,
    /// Enumerations and bitfields.
    pub enums: Vec<EnumDef>,
    /// Constants.
    pub constants: Vec<ConstantDef>,
    /// Namespace-level functions.
    pub functions: Vec<CallableDef>,
    /// Type aliases.
    pub aliases: Vec<AliasDef>,
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Looks up a class or interface by name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Looks up an enumeration or bitfield by name.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// Whether a class-like element came from `<class>` or `<interface>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    /// `<class>`.
    #[default]
    Class,
    /// `<interface>`.
    Interface,
}

/// Class or interface definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Element kind.
    pub kind: ClassKind,
    /// Parent class (`parent` attribute).
    pub parent: Option<String>,
    /// Implemented interfaces.
    pub implements: Vec<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Methods, virtual methods, constructors and static functions.
    pub methods: Vec<CallableDef>,
    /// Position among the namespace's classes, interfaces and enums.
    pub position: usize,
}

impl ClassDef {
    /// Creates a new class definition.
    #[must_use]
    pub fn new(name: String, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            parent: None,
            implements: Vec::new(),
            doc: None,
            methods: Vec::new(),
            position: 0,
        }
    }

    /// Adds a callable to the class.
    pub fn add_method(&mut self, method: CallableDef) {
        self.methods.push(method);
    }
}

/// Which element a callable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// `<function>`.
    Function,
    /// `<method>`.
    Method,
    /// `<virtual-method>`.
    VirtualMethod,
    /// `<constructor>`.
    Constructor,
}

impl CallableKind {
    /// Maps a GIR element name to a callable kind.
    #[must_use]
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "function" => Some(Self::Function),
            "method" => Some(Self::Method),
            "virtual-method" => Some(Self::VirtualMethod),
            "constructor" => Some(Self::Constructor),
            _ => None,
        }
    }

    /// Returns the GIR element name.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::VirtualMethod => "virtual-method",
            Self::Constructor => "constructor",
        }
    }
}

/// Function, method, virtual method or constructor.
#[derive(Debug, Clone)]
pub struct CallableDef {
    /// Callable name.
    pub name: String,
    /// Element kind.
    pub kind: CallableKind,
    /// Documentation text.
    pub doc: Option<String>,
    /// Return type, if the `<return-value>` carries one.
    pub return_type: Option<TypeRef>,
    /// Parameters including the instance parameter.
    pub parameters: Vec<ParamDef>,
}

impl CallableDef {
    /// Creates a new callable with no parameters.
    #[must_use]
    pub fn new(name: String, kind: CallableKind) -> Self {
        Self {
            name,
            kind,
            doc: None,
            return_type: None,
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    pub fn add_parameter(&mut self, param: ParamDef) {
        self.parameters.push(param);
    }
}

/// Instance or regular parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `<instance-parameter>`.
    Instance,
    /// `<parameter>`.
    Regular,
}

/// Parameter definition.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Parameter kind.
    pub kind: ParamKind,
    /// Parameter type.
    pub type_ref: TypeRef,
    /// Documentation text.
    pub doc: Option<String>,
}

impl ParamDef {
    /// Creates a new parameter with no type information.
    #[must_use]
    pub fn new(name: String, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            type_ref: TypeRef::Missing,
            doc: None,
        }
    }

    /// Returns true for the varargs placeholder parameter.
    #[must_use]
    pub fn is_varargs(&self) -> bool {
        self.name == "..." || matches!(self.type_ref, TypeRef::Varargs)
    }
}

/// Reference to a GIR type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `<type name=".."/>`.
    Named(String),
    /// `<array>` with the element type name, when present.
    Array(Option<String>),
    /// `<varargs/>`.
    Varargs,
    /// No type information.
    Missing,
}

impl TypeRef {
    /// Returns the named type, if this is a plain named type.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// Whether an enum came from `<enumeration>` or `<bitfield>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    /// `<enumeration>`.
    Enumeration,
    /// `<bitfield>`.
    Bitfield,
}

/// Enumeration or bitfield definition.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Element kind.
    pub kind: EnumKind,
    /// Documentation text.
    pub doc: Option<String>,
    /// Members in document order.
    pub members: Vec<EnumMember>,
    /// Position among the namespace's classes, interfaces and enums.
    pub position: usize,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: String, kind: EnumKind) -> Self {
        Self {
            name,
            kind,
            doc: None,
            members: Vec::new(),
            position: 0,
        }
    }

    /// Adds a member.
    pub fn add_member(&mut self, member: EnumMember) {
        self.members.push(member);
    }
}

/// Enum or bitfield member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name as written in the GIR (usually lower case).
    pub name: String,
    /// Member value as written in the GIR.
    pub value: String,
    /// Documentation text.
    pub doc: Option<String>,
}

impl EnumMember {
    /// Creates a new member.
    #[must_use]
    pub fn new(name: String, value: String) -> Self {
        Self {
            name,
            value,
            doc: None,
        }
    }
}

/// Constant definition.
#[derive(Debug, Clone)]
pub struct ConstantDef {
    /// Constant name.
    pub name: String,
    /// Constant value as written in the GIR.
    pub value: String,
    /// Constant type.
    pub type_ref: TypeRef,
    /// Documentation text.
    pub doc: Option<String>,
}

impl ConstantDef {
    /// Creates a new constant.
    #[must_use]
    pub fn new(name: String, value: String) -> Self {
        Self {
            name,
            value,
            type_ref: TypeRef::Missing,
            doc: None,
        }
    }
}

/// Alias definition (`<alias>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDef {
    /// Alias name.
    pub name: String,
    /// Target type.
    pub target: TypeRef,
}

/// Documentation slot filled from `<doc>`, `<doc-deprecated>` and
/// `<doc-version>`.
///
/// `<doc>` always wins; the other two only fill an empty slot.
#[derive(Debug, Clone, Default)]
pub struct DocSlot {
    text: Option<String>,
}

impl DocSlot {
    /// Records text from the element with the given name.
    pub fn offer(&mut self, element: &str, text: String) {
        if text.is_empty() {
            return;
        }
        match element {
            "doc" => self.text = Some(text),
            "doc-deprecated" | "doc-version" if self.text.is_none() => self.text = Some(text),
            _ => {}
        }
    }

    /// Returns the recorded text.
    #[must_use]
    pub fn into_inner(self) -> Option<String> {
        self.text
    }
}
