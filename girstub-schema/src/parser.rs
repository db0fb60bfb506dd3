//! GIR XML parser.
//!
//! This module parses GObject Introspection repository files into the
//! [`Repository`] model. Only the parts of the format that stub generation
//! consumes are kept; everything else is skipped.

use crate::error::ParseError;
use crate::types::{
    AliasDef, CallableDef, CallableKind, ClassDef, ClassKind, ConstantDef, DocSlot, EnumDef,
    EnumKind, EnumMember, Include, Namespace, ParamDef, ParamKind, Repository, TypeRef,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Options controlling how strictly unknown markup is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on elements the parser does not recognise in their context.
    pub strict: bool,
}

impl ParseOptions {
    /// Lenient parsing: unknown elements are skipped.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict parsing: unknown elements are errors.
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Elements inside `<namespace>` that carry nothing a stub needs.
const IGNORED_IN_NAMESPACE: &[&str] = &[
    "function-macro",
    "function-inline",
    "record",
    "callback",
    "glib:boxed",
    "docsection",
    "union",
    "doc",
    "attribute",
];

/// Elements inside `<class>`/`<interface>` that carry nothing a stub needs.
const IGNORED_IN_CLASS: &[&str] = &[
    "source-position",
    "doc-stability",
    "method-inline",
    "function-inline",
    "property",
    "glib:signal",
    "field",
    "union",
    "record",
    "callback",
    "attribute",
    "prerequisite",
];

/// Parses a GIR document leniently.
///
/// # Arguments
/// * `xml` - GIR document content
///
/// # Returns
/// Parsed repository or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or has no `<namespace>`.
pub fn parse_repository(xml: &str) -> Result<Repository, ParseError> {
    parse_repository_with(xml, &ParseOptions::lenient())
}

/// Parses a GIR document with explicit options.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a required attribute is
/// missing, the document has no `<namespace>`, or (in strict mode) an
/// unknown element is found.
pub fn parse_repository_with(xml: &str, options: &ParseOptions) -> Result<Repository, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut version = None;
    let mut includes = Vec::new();
    let mut c_includes = Vec::new();
    let mut packages = Vec::new();
    let mut namespace: Option<Namespace> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "repository" => {
                for (key, value) in read_attrs(&e, "repository")? {
                    if key == "version" {
                        version = Some(value);
                    }
                }
            }
            "include" => {
                includes.push(parse_include(&e)?);
                skip_element(&mut reader, empty)?;
            }
            "c:include" => {
                c_includes.push(required_attr(&e, "c:include", "name")?);
                skip_element(&mut reader, empty)?;
            }
            "package" => {
                packages.push(required_attr(&e, "package", "name")?);
                skip_element(&mut reader, empty)?;
            }
            "namespace" => {
                if namespace.is_some() {
                    return Err(ParseError::structure("more than one <namespace> element"));
                }
                namespace = Some(parse_namespace(&mut reader, &e, empty, options)?);
            }
            "doc:format" | "doc" => skip_element(&mut reader, empty)?,
            _ => unknown_child(&mut reader, &tag, "repository", empty, options)?,
        }
    }

    let namespace =
        namespace.ok_or_else(|| ParseError::structure("No namespace element found"))?;

    let mut repository = Repository::new(namespace);
    repository.version = version;
    repository.includes = includes;
    repository.c_includes = c_includes;
    repository.packages = packages;

    Ok(repository)
}

/// Parses an `<include>` element.
fn parse_include(e: &BytesStart<'_>) -> Result<Include, ParseError> {
    let mut name = None;
    let mut version = None;

    for (key, value) in read_attrs(e, "include")? {
        match key.as_str() {
            "name" => name = Some(value),
            "version" => version = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("include", "name"))?;
    Ok(Include::new(name, version))
}

/// Parses the `<namespace>` element and everything below it.
fn parse_namespace(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
    options: &ParseOptions,
) -> Result<Namespace, ParseError> {
    let mut name = None;
    let mut version = None;
    let mut shared_library = None;

    for (key, value) in read_attrs(e, "namespace")? {
        match key.as_str() {
            "name" => name = Some(value),
            "version" => version = Some(value),
            "shared-library" => shared_library = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("namespace", "name"))?;
    let mut namespace = Namespace::new(name);
    namespace.version = version;
    namespace.shared_library = shared_library;

    if empty {
        return Ok(namespace);
    }

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("namespace")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        let position = namespace.classes.len() + namespace.enums.len();

        match tag.as_str() {
            "class" => {
                let mut class = parse_class(reader, &e, ClassKind::Class, empty, options)?;
                class.position = position;
                namespace.classes.push(class);
            }
            "interface" => {
                let mut class = parse_class(reader, &e, ClassKind::Interface, empty, options)?;
                class.position = position;
                namespace.classes.push(class);
            }
            "enumeration" => {
                let mut enum_def =
                    parse_enum(reader, &e, EnumKind::Enumeration, empty, options)?;
                enum_def.position = position;
                namespace.enums.push(enum_def);
            }
            "bitfield" => {
                let mut enum_def = parse_enum(reader, &e, EnumKind::Bitfield, empty, options)?;
                enum_def.position = position;
                namespace.enums.push(enum_def);
            }
            "constant" => {
                let constant = parse_constant(reader, &e, empty)?;
                namespace.constants.push(constant);
            }
            "function" => {
                let function =
                    parse_callable(reader, &e, CallableKind::Function, empty, options)?;
                namespace.functions.push(function);
            }
            "alias" => {
                let alias = parse_alias(reader, &e, empty)?;
                namespace.aliases.push(alias);
            }
            other if IGNORED_IN_NAMESPACE.contains(&other) => skip_element(reader, empty)?,
            other => unknown_child(reader, other, "namespace", empty, options)?,
        }
    }

    Ok(namespace)
}

/// Parses a `<class>` or `<interface>` element.
fn parse_class(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: ClassKind,
    empty: bool,
    options: &ParseOptions,
) -> Result<ClassDef, ParseError> {
    let element = match kind {
        ClassKind::Class => "class",
        ClassKind::Interface => "interface",
    };
    let mut name = None;
    let mut parent = None;

    for (key, value) in read_attrs(e, element)? {
        match key.as_str() {
            "name" => name = Some(value),
            "parent" => parent = Some(value),
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ParseError::missing_attr(element, "name"))?;
    let mut class = ClassDef::new(name, kind);
    class.parent = parent;

    if empty {
        return Ok(class);
    }

    let mut doc = DocSlot::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(element)),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "method" | "virtual-method" | "constructor" | "function" => {
                let callable_kind =
                    CallableKind::from_element(&tag).unwrap_or(CallableKind::Method);
                let method = parse_callable(reader, &e, callable_kind, empty, options)?;
                class.add_method(method);
            }
            "implements" => {
                class
                    .implements
                    .push(required_attr(&e, "implements", "name")?);
                skip_element(reader, empty)?;
            }
            "doc" | "doc-deprecated" | "doc-version" => {
                let text = read_text_or_empty(reader, empty)?;
                doc.offer(&tag, text);
            }
            other if IGNORED_IN_CLASS.contains(&other) => skip_element(reader, empty)?,
            other => unknown_child(reader, other, element, empty, options)?,
        }
    }

    class.doc = doc.into_inner();
    Ok(class)
}

/// Parses a function, method, virtual method or constructor.
fn parse_callable(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: CallableKind,
    empty: bool,
    options: &ParseOptions,
) -> Result<CallableDef, ParseError> {
    let element = kind.element_name();
    let name = required_attr(e, element, "name")?;
    let mut callable = CallableDef::new(name, kind);

    if empty {
        return Ok(callable);
    }

    let mut doc = DocSlot::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(element)),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "return-value" => {
                callable.return_type = parse_return_value(reader, empty)?;
            }
            "parameters" => {
                if !empty {
                    parse_parameters(reader, &mut callable, options)?;
                }
            }
            "doc" | "doc-deprecated" | "doc-version" => {
                let text = read_text_or_empty(reader, empty)?;
                doc.offer(&tag, text);
            }
            "attribute" | "source-position" | "doc-stability" => skip_element(reader, empty)?,
            other => unknown_child(reader, other, element, empty, options)?,
        }
    }

    callable.doc = doc.into_inner();
    Ok(callable)
}

/// Parses a `<return-value>` element, returning its type if it has one.
fn parse_return_value(
    reader: &mut Reader<&[u8]>,
    empty: bool,
) -> Result<Option<TypeRef>, ParseError> {
    if empty {
        return Ok(None);
    }

    let mut type_ref = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("return-value")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "type" => {
                type_ref = optional_attr(&e, "type", "name")?.map(TypeRef::Named);
                skip_element(reader, empty)?;
            }
            "array" => type_ref = Some(parse_array(reader, empty)?),
            _ => skip_element(reader, empty)?,
        }
    }

    Ok(type_ref)
}

/// Parses the `<parameters>` element into the callable.
fn parse_parameters(
    reader: &mut Reader<&[u8]>,
    callable: &mut CallableDef,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("parameters")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "parameter" => {
                let param = parse_param(reader, &e, ParamKind::Regular, empty, options)?;
                callable.add_parameter(param);
            }
            "instance-parameter" => {
                let param = parse_param(reader, &e, ParamKind::Instance, empty, options)?;
                callable.add_parameter(param);
            }
            other => unknown_child(reader, other, "parameters", empty, options)?,
        }
    }

    Ok(())
}

/// Parses a `<parameter>` or `<instance-parameter>` element.
fn parse_param(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: ParamKind,
    empty: bool,
    options: &ParseOptions,
) -> Result<ParamDef, ParseError> {
    let element = match kind {
        ParamKind::Instance => "instance-parameter",
        ParamKind::Regular => "parameter",
    };
    let name = required_attr(e, element, "name")?;
    let mut param = ParamDef::new(name, kind);

    if empty {
        return Ok(param);
    }

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(element)),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "doc" => {
                let text = read_text_or_empty(reader, empty)?;
                if !text.is_empty() {
                    param.doc = Some(text);
                }
            }
            "type" => {
                param.type_ref = optional_attr(&e, "type", "name")?
                    .map_or(TypeRef::Missing, TypeRef::Named);
                skip_element(reader, empty)?;
            }
            "array" => param.type_ref = parse_array(reader, empty)?,
            "varargs" => {
                param.type_ref = TypeRef::Varargs;
                skip_element(reader, empty)?;
            }
            "attribute" => skip_element(reader, empty)?,
            other => unknown_child(reader, other, element, empty, options)?,
        }
    }

    Ok(param)
}

/// Parses an `<array>` element, keeping the name of its direct element type.
fn parse_array(reader: &mut Reader<&[u8]>, empty: bool) -> Result<TypeRef, ParseError> {
    if empty {
        return Ok(TypeRef::Array(None));
    }

    let mut element_type = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("array")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };

        if tag_name(&e)? == "type" && element_type.is_none() {
            element_type = optional_attr(&e, "type", "name")?;
        }
        skip_element(reader, empty)?;
    }

    Ok(TypeRef::Array(element_type))
}

/// Parses an `<enumeration>` or `<bitfield>` element.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: EnumKind,
    empty: bool,
    options: &ParseOptions,
) -> Result<EnumDef, ParseError> {
    let element = match kind {
        EnumKind::Enumeration => "enumeration",
        EnumKind::Bitfield => "bitfield",
    };
    let name = required_attr(e, element, "name")?;
    let mut enum_def = EnumDef::new(name, kind);

    if empty {
        return Ok(enum_def);
    }

    let mut doc = DocSlot::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(element)),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };
        let tag = tag_name(&e)?;

        match tag.as_str() {
            "member" => {
                let member = parse_member(reader, &e, empty)?;
                enum_def.add_member(member);
            }
            "doc" | "doc-deprecated" | "doc-version" => {
                let text = read_text_or_empty(reader, empty)?;
                doc.offer(&tag, text);
            }
            // Static functions on enums have no stub representation.
            "function" | "source-position" | "attribute" | "doc-stability" => {
                skip_element(reader, empty)?;
            }
            other => unknown_child(reader, other, element, empty, options)?,
        }
    }

    enum_def.doc = doc.into_inner();
    Ok(enum_def)
}

/// Parses an enum `<member>` element.
fn parse_member(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<EnumMember, ParseError> {
    let mut name = None;
    let mut value = None;

    for (key, attr_value) in read_attrs(e, "member")? {
        match key.as_str() {
            "name" => name = Some(attr_value),
            "value" => value = Some(attr_value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("member", "name"))?;
    let value = value.ok_or_else(|| ParseError::missing_attr("member", "value"))?;
    let mut member = EnumMember::new(name, value);
    member.doc = read_doc_child(reader, empty)?;

    Ok(member)
}

/// Parses a `<constant>` element.
fn parse_constant(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<ConstantDef, ParseError> {
    let mut name = None;
    let mut value = None;

    for (key, attr_value) in read_attrs(e, "constant")? {
        match key.as_str() {
            "name" => name = Some(attr_value),
            "value" => value = Some(attr_value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("constant", "name"))?;
    let value = value.ok_or_else(|| ParseError::missing_attr("constant", "value"))?;
    let mut constant = ConstantDef::new(name, value);

    if empty {
        return Ok(constant);
    }

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("constant")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };

        match tag_name(&e)?.as_str() {
            "doc" => {
                let text = read_text_or_empty(reader, empty)?;
                if !text.is_empty() {
                    constant.doc = Some(text);
                }
            }
            "type" => {
                if let Some(type_name) = optional_attr(&e, "type", "name")? {
                    constant.type_ref = TypeRef::Named(type_name);
                }
                skip_element(reader, empty)?;
            }
            _ => skip_element(reader, empty)?,
        }
    }

    Ok(constant)
}

/// Parses an `<alias>` element.
fn parse_alias(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<AliasDef, ParseError> {
    let name = required_attr(e, "alias", "name")?;
    let mut target = TypeRef::Missing;

    if !empty {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (e, empty) = match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => (e, false),
                Ok(Event::Empty(e)) => (e, true),
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => return Err(unexpected_eof("alias")),
                Ok(_) => continue,
                Err(e) => return Err(ParseError::Xml(e)),
            };
            if tag_name(&e)? == "type" {
                if let Some(type_name) = optional_attr(&e, "type", "name")? {
                    target = TypeRef::Named(type_name);
                }
            }
            skip_element(reader, empty)?;
        }
    }

    Ok(AliasDef { name, target })
}

/// Reads the children of an element, returning the text of its first
/// `<doc>` child.
fn read_doc_child(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Option<String>, ParseError> {
    if empty {
        return Ok(None);
    }

    let mut doc = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("member")),
            Ok(_) => continue,
            Err(e) => return Err(ParseError::Xml(e)),
        };

        if tag_name(&e)? == "doc" && doc.is_none() {
            let text = read_text_or_empty(reader, empty)?;
            if !text.is_empty() {
                doc = Some(text);
            }
        } else {
            skip_element(reader, empty)?;
        }
    }

    Ok(doc)
}

/// Reads the text content of the current element up to its end tag.
///
/// Entity references are resolved, CDATA is kept verbatim, nested markup is
/// dropped and the result is trimmed.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let raw = std::str::from_utf8(t.as_ref())?;
                match quick_xml::escape::unescape(raw) {
                    Ok(unescaped) => text.push_str(&unescaped),
                    Err(_) => text.push_str(raw),
                }
            }
            Ok(Event::CData(ref t)) => {
                text.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::GeneralRef(ref r)) => {
                let name = std::str::from_utf8(r)?;
                match resolve_entity(name) {
                    Some(resolved) => text.push_str(&resolved),
                    None => {
                        text.push('&');
                        text.push_str(name);
                        text.push(';');
                    }
                }
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof("doc")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

/// Reads element text, or returns an empty string for empty elements.
fn read_text_or_empty(reader: &mut Reader<&[u8]>, empty: bool) -> Result<String, ParseError> {
    if empty {
        Ok(String::new())
    } else {
        read_text(reader)
    }
}

/// Resolves a predefined or numeric character entity by name.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    quick_xml::escape::resolve_predefined_entity(name).map(str::to_string)
}

/// Handles an element that is not expected in the given context.
fn unknown_child(
    reader: &mut Reader<&[u8]>,
    tag: &str,
    context: &str,
    empty: bool,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    if options.strict {
        return Err(ParseError::unknown_element(tag, context));
    }
    tracing::debug!(element = tag, context, "skipping unknown element");
    skip_element(reader, empty)
}

/// Skips the current element unless it was self-closing.
fn skip_element(reader: &mut Reader<&[u8]>, empty: bool) -> Result<(), ParseError> {
    if empty { Ok(()) } else { skip_to_end(reader) }
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Returns the qualified name of an element, e.g. `glib:signal`.
fn tag_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// Collects the unescaped attributes of an element.
fn read_attrs(e: &BytesStart<'_>, element: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)
            .map_err(|_| ParseError::invalid_attr(element, key, raw))?;
        attrs.push((key.to_string(), value.into_owned()));
    }

    Ok(attrs)
}

/// Returns the value of an attribute if present.
fn optional_attr(
    e: &BytesStart<'_>,
    element: &str,
    attribute: &str,
) -> Result<Option<String>, ParseError> {
    Ok(read_attrs(e, element)?
        .into_iter()
        .find(|(key, _)| key == attribute)
        .map(|(_, value)| value))
}

/// Returns the value of a required attribute.
fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    optional_attr(e, element, attribute)?
        .ok_or_else(|| ParseError::missing_attr(element, attribute))
}

fn unexpected_eof(element: &str) -> ParseError {
    ParseError::structure(format!("unexpected end of document inside <{element}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GTK_SNIPPET: &str = r#"<?xml version="1.0"?>
<repository version="1.2"
            xmlns="http://www.gtk.org/introspection/core/1.0"
            xmlns:c="http://www.gtk.org/introspection/c/1.0"
            xmlns:glib="http://www.gtk.org/introspection/glib/1.0">
  <include name="Gdk" version="4.0"/>
  <include name="Gio" version="2.0"/>
  <package name="gtk4"/>
  <c:include name="gtk/gtk.h"/>
  <namespace name="Gtk" version="4.0" shared-library="libgtk-4.so.1">
    <alias name="Allocation" c:type="GtkAllocation">
      <type name="Gdk.Rectangle" c:type="GdkRectangle"/>
    </alias>
    <class name="Window" parent="Widget" glib:type-name="GtkWindow">
      <doc xml:space="preserve">A toplevel window.</doc>
      <implements name="Root"/>
      <implements name="Native"/>
      <constructor name="new" c:identifier="gtk_window_new">
        <return-value transfer-ownership="none">
          <type name="Widget" c:type="GtkWidget*"/>
        </return-value>
      </constructor>
      <function name="list_toplevels">
        <return-value>
          <type name="Gio.ListModel"/>
        </return-value>
      </function>
      <virtual-method name="activate_default">
        <return-value transfer-ownership="none">
          <type name="none" c:type="void"/>
        </return-value>
        <parameters>
          <instance-parameter name="window" transfer-ownership="none">
            <type name="Window" c:type="GtkWindow*"/>
          </instance-parameter>
        </parameters>
      </virtual-method>
      <method name="set_title" c:identifier="gtk_window_set_title">
        <doc xml:space="preserve">Sets the title &lt;b&gt;bold&lt;/b&gt; &amp; more.</doc>
        <source-position filename="gtk/gtkwindow.h" line="73"/>
        <return-value transfer-ownership="none">
          <type name="none" c:type="void"/>
        </return-value>
        <parameters>
          <instance-parameter name="window" transfer-ownership="none">
            <type name="Window" c:type="GtkWindow*"/>
          </instance-parameter>
          <parameter name="title" transfer-ownership="none" nullable="1">
            <doc xml:space="preserve">the title</doc>
            <type name="utf8" c:type="const char*"/>
          </parameter>
        </parameters>
      </method>
      <property name="title" writable="1" transfer-ownership="none">
        <type name="utf8" c:type="gchar*"/>
      </property>
      <glib:signal name="close-request" when="last">
        <return-value transfer-ownership="none">
          <type name="gboolean" c:type="gboolean"/>
        </return-value>
      </glib:signal>
    </class>
    <interface name="Root" glib:type-name="GtkRoot">
      <prerequisite name="Native"/>
    </interface>
    <enumeration name="Align" glib:type-name="GtkAlign">
      <doc-deprecated xml:space="preserve">old</doc-deprecated>
      <doc xml:space="preserve">Alignment.</doc>
      <member name="fill" value="0" c:identifier="GTK_ALIGN_FILL">
        <doc xml:space="preserve">stretch</doc>
      </member>
      <member name="start" value="1" c:identifier="GTK_ALIGN_START"/>
      <function name="get_type"/>
    </enumeration>
    <bitfield name="StateFlags">
      <member name="normal" value="0"/>
      <member name="active" value="1"/>
    </bitfield>
    <constant name="MAJOR_VERSION" value="4" c:type="GTK_MAJOR_VERSION">
      <doc xml:space="preserve">Major version.</doc>
      <type name="gint" c:type="gint"/>
    </constant>
    <function name="init" c:identifier="gtk_init" deprecated="1">
      <return-value transfer-ownership="none">
        <type name="none" c:type="void"/>
      </return-value>
    </function>
    <record name="WindowClass" glib:is-gtype-struct-for="Window">
      <field name="parent_class"><type name="WidgetClass"/></field>
    </record>
    <callback name="TickCallback">
      <return-value><type name="gboolean"/></return-value>
    </callback>
  </namespace>
</repository>"#;

    #[test]
    fn test_parse_repository_header() {
        let repo = parse_repository(GTK_SNIPPET).expect("Failed to parse repository");

        assert_eq!(repo.version.as_deref(), Some("1.2"));
        assert_eq!(repo.include_names(), vec!["Gdk", "Gio"]);
        assert_eq!(repo.packages, vec!["gtk4"]);
        assert_eq!(repo.c_includes, vec!["gtk/gtk.h"]);
        assert_eq!(repo.namespace.name, "Gtk");
        assert_eq!(repo.namespace.version.as_deref(), Some("4.0"));
        assert_eq!(
            repo.namespace.shared_library.as_deref(),
            Some("libgtk-4.so.1")
        );
    }

    #[test]
    fn test_parse_class() {
        let repo = parse_repository(GTK_SNIPPET).expect("Failed to parse repository");
        let window = repo.namespace.get_class("Window").unwrap();

        assert_eq!(window.kind, ClassKind::Class);
        assert_eq!(window.parent.as_deref(), Some("Widget"));
        assert_eq!(window.implements, vec!["Root", "Native"]);
        assert_eq!(window.doc.as_deref(), Some("A toplevel window."));

        let kinds: Vec<_> = window.methods.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CallableKind::Constructor,
                CallableKind::Function,
                CallableKind::VirtualMethod,
                CallableKind::Method,
            ]
        );

        let root = repo.namespace.get_class("Root").unwrap();
        assert_eq!(root.kind, ClassKind::Interface);
        assert!(root.methods.is_empty());
    }

    #[test]
    fn test_parse_method_details() {
        let repo = parse_repository(GTK_SNIPPET).expect("Failed to parse repository");
        let window = repo.namespace.get_class("Window").unwrap();
        let set_title = window
            .methods
            .iter()
            .find(|m| m.name == "set_title")
            .unwrap();

        assert_eq!(
            set_title.doc.as_deref(),
            Some("Sets the title <b>bold</b> & more.")
        );
        assert_eq!(set_title.return_type, Some(TypeRef::Named("none".into())));
        assert_eq!(set_title.parameters.len(), 2);
        assert_eq!(set_title.parameters[0].kind, ParamKind::Instance);
        assert_eq!(set_title.parameters[1].name, "title");
        assert_eq!(
            set_title.parameters[1].type_ref,
            TypeRef::Named("utf8".into())
        );
        assert_eq!(set_title.parameters[1].doc.as_deref(), Some("the title"));
    }

    #[test]
    fn test_parse_enums_and_constants() {
        let repo = parse_repository(GTK_SNIPPET).expect("Failed to parse repository");
        let ns = &repo.namespace;

        let align = ns.get_enum("Align").unwrap();
        assert_eq!(align.kind, EnumKind::Enumeration);
        assert_eq!(align.doc.as_deref(), Some("Alignment."));
        assert_eq!(align.members.len(), 2);
        assert_eq!(align.members[0].doc.as_deref(), Some("stretch"));
        assert_eq!(align.members[1].value, "1");

        let flags = ns.get_enum("StateFlags").unwrap();
        assert_eq!(flags.kind, EnumKind::Bitfield);

        assert_eq!(ns.constants.len(), 1);
        assert_eq!(ns.constants[0].name, "MAJOR_VERSION");
        assert_eq!(ns.constants[0].type_ref, TypeRef::Named("gint".into()));
        assert_eq!(ns.constants[0].doc.as_deref(), Some("Major version."));
    }

    #[test]
    fn test_parse_functions_and_aliases() {
        let repo = parse_repository(GTK_SNIPPET).expect("Failed to parse repository");
        let ns = &repo.namespace;

        assert_eq!(ns.functions.len(), 1);
        assert_eq!(ns.functions[0].name, "init");

        assert_eq!(ns.aliases.len(), 1);
        assert_eq!(
            ns.aliases[0].target,
            TypeRef::Named("Gdk.Rectangle".into())
        );
    }

    #[test]
    fn test_parse_arrays_and_varargs() {
        let xml = r#"<repository><namespace name="T">
  <function name="f">
    <return-value><array c:type="char**"><type name="utf8"/></array></return-value>
    <parameters>
      <parameter name="items"><array length="1"><type name="gint"/></array></parameter>
      <parameter name="raw"><array c:type="gpointer"/></parameter>
      <parameter name="..."><varargs/></parameter>
      <parameter name="untyped"/>
    </parameters>
  </function>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse repository");
        let f = &repo.namespace.functions[0];

        assert_eq!(f.return_type, Some(TypeRef::Array(Some("utf8".into()))));
        assert_eq!(f.parameters[0].type_ref, TypeRef::Array(Some("gint".into())));
        assert_eq!(f.parameters[1].type_ref, TypeRef::Array(None));
        assert_eq!(f.parameters[2].type_ref, TypeRef::Varargs);
        assert_eq!(f.parameters[3].type_ref, TypeRef::Missing);
    }

    #[test]
    fn test_missing_namespace() {
        let result = parse_repository(r#"<repository version="1.2"></repository>"#);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_missing_member_value() {
        let xml = r#"<repository><namespace name="T">
  <enumeration name="E"><member name="a"/></enumeration>
</namespace></repository>"#;

        let result = parse_repository(xml);
        assert!(matches!(
            result,
            Err(ParseError::MissingAttribute { ref attribute, .. }) if attribute == "value"
        ));
    }

    #[test]
    fn test_unknown_element_lenient_and_strict() {
        let xml = r#"<repository><namespace name="T">
  <class name="C">
    <frobnicate><method name="hidden"/></frobnicate>
    <method name="visible"/>
  </class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("lenient parse should succeed");
        let class = repo.namespace.get_class("C").unwrap();
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "visible");

        let strict = parse_repository_with(xml, &ParseOptions::strict());
        assert!(matches!(
            strict,
            Err(ParseError::UnknownElement { ref element, .. }) if element == "frobnicate"
        ));
    }

    #[test]
    fn test_numeric_entities_and_cdata() {
        let xml = r#"<repository><namespace name="T">
  <class name="C"><doc>caf&#233; &#x41;<![CDATA[ <raw> ]]></doc></class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse repository");
        let class = repo.namespace.get_class("C").unwrap();
        assert_eq!(class.doc.as_deref(), Some("café A <raw>"));
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("lt").as_deref(), Some("<"));
        assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
        assert_eq!(resolve_entity("#x42").as_deref(), Some("B"));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_repository("<repository><namespace name=\"T\"></repository>");
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_skips_known_gir_elements() {
        let xml = r#"<repository><namespace name="GLib" version="2.0">
  <function-inline name="clear_pointer"/>
  <class name="Object">
    <doc-stability xml:space="preserve">Stable</doc-stability>
    <method-inline name="ref_sink"><return-value><type name="none"/></return-value></method-inline>
    <function-inline name="new_inline"/>
    <method name="ref"/>
  </class>
  <enumeration name="Mode">
    <doc-stability xml:space="preserve">Unstable</doc-stability>
    <member name="on" value="1"/>
  </enumeration>
</namespace></repository>"#;

        let repo = parse_repository_with(xml, &ParseOptions::strict())
            .expect("standard GIR elements are accepted in strict mode");
        let ns = &repo.namespace;
        assert!(ns.functions.is_empty());

        let object = ns.get_class("Object").unwrap();
        assert_eq!(object.methods.len(), 1);
        assert_eq!(object.methods[0].name, "ref");
        assert!(object.doc.is_none());

        let mode = ns.get_enum("Mode").unwrap();
        assert_eq!(mode.members.len(), 1);
        assert!(mode.doc.is_none());
    }

    #[test]
    fn test_type_positions_follow_document_order() {
        let xml = r#"<repository><namespace name="T">
  <enumeration name="E"/>
  <class name="C"/>
  <bitfield name="F"/>
  <interface name="I"/>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse repository");
        let ns = &repo.namespace;
        assert_eq!(ns.get_enum("E").unwrap().position, 0);
        assert_eq!(ns.get_class("C").unwrap().position, 1);
        assert_eq!(ns.get_enum("F").unwrap().position, 2);
        assert_eq!(ns.get_class("I").unwrap().position, 3);
    }
}
