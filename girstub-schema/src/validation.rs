//! Repository validation utilities.
//!
//! Name collisions that stub output would otherwise resolve silently.

use crate::error::SchemaError;
use crate::types::{CallableKind, ClassDef, EnumDef, Repository};
use std::collections::HashSet;

/// Validates a parsed repository for name collisions.
///
/// # Arguments
/// * `repository` - The repository to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_repository(repository: &Repository) -> Result<(), SchemaError> {
    let namespace = &repository.namespace;
    if namespace.name.is_empty() {
        return Err(SchemaError::Validation {
            message: "namespace has an empty name".to_string(),
        });
    }

    validate_type_names(repository)?;

    for class in &namespace.classes {
        validate_class(class)?;
    }
    for enum_def in &namespace.enums {
        validate_enum(enum_def)?;
    }

    Ok(())
}

/// Classes, interfaces, enumerations and bitfields share one name space.
fn validate_type_names(repository: &Repository) -> Result<(), SchemaError> {
    let namespace = &repository.namespace;
    let mut seen = HashSet::new();

    let names = namespace
        .classes
        .iter()
        .map(|c| c.name.as_str())
        .chain(namespace.enums.iter().map(|e| e.name.as_str()));

    for name in names {
        if !seen.insert(name) {
            return Err(SchemaError::duplicate("type", name));
        }
    }

    Ok(())
}

/// Validates a class definition.
///
/// Methods, constructors and static functions share one name space. A
/// virtual method may reuse the name of the method that invokes it.
fn validate_class(class: &ClassDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for method in &class.methods {
        let is_virtual = method.kind == CallableKind::VirtualMethod;
        if !seen.insert((is_virtual, method.name.as_str())) {
            return Err(SchemaError::duplicate(
                "method",
                format!("{}.{}", class.name, method.name),
            ));
        }
    }

    Ok(())
}

/// Validates an enumeration or bitfield definition.
fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for member in &enum_def.members {
        if !seen.insert(member.name.to_uppercase()) {
            return Err(SchemaError::duplicate(
                "member",
                format!("{}.{}", enum_def.name, member.name),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_repository;

    #[test]
    fn test_valid_repository() {
        let xml = r#"<repository><namespace name="T">
  <class name="A"><method name="run"/></class>
  <enumeration name="B"><member name="x" value="0"/></enumeration>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        assert!(validate_repository(&repo).is_ok());
    }

    #[test]
    fn test_duplicate_type_across_kinds() {
        let xml = r#"<repository><namespace name="T">
  <class name="A"/>
  <bitfield name="A"><member name="x" value="1"/></bitfield>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        let err = validate_repository(&repo).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateDefinition { ref kind, ref name } if kind == "type" && name == "A"
        ));
    }

    #[test]
    fn test_duplicate_method() {
        let xml = r#"<repository><namespace name="T">
  <class name="A"><method name="run"/><method name="run"/></class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        let err = validate_repository(&repo).unwrap_err();
        assert!(err.to_string().contains("A.run"));
    }

    #[test]
    fn test_method_and_static_function_collide() {
        let xml = r#"<repository><namespace name="T">
  <class name="C"><method name="run"/><function name="run"/></class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        let err = validate_repository(&repo).unwrap_err();
        assert!(err.to_string().contains("C.run"));
    }

    #[test]
    fn test_duplicate_virtual_methods_collide() {
        let xml = r#"<repository><namespace name="T">
  <class name="C"><virtual-method name="draw"/><virtual-method name="draw"/></class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        assert!(validate_repository(&repo).is_err());
    }

    #[test]
    fn test_virtual_method_may_shadow_method() {
        let xml = r#"<repository><namespace name="T">
  <class name="A"><method name="show"/><virtual-method name="show"/></class>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        assert!(validate_repository(&repo).is_ok());
    }

    #[test]
    fn test_duplicate_member_after_upper_casing() {
        let xml = r#"<repository><namespace name="T">
  <enumeration name="E"><member name="x" value="0"/><member name="X" value="1"/></enumeration>
</namespace></repository>"#;

        let repo = parse_repository(xml).expect("Failed to parse");
        assert!(validate_repository(&repo).is_err());
    }
}
