//! Registry validation: identifiers are interpolated into SQL, so they are checked before serving.

use crate::config::{ResourceRegistry, ResourceSchema};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

fn identifier_pattern() -> Result<Regex, ConfigError> {
    Regex::new(r"^[a-z_][a-z0-9_]*$").map_err(|e| ConfigError::Validation(e.to_string()))
}

fn check_identifier(re: &Regex, kind: &'static str, value: &str) -> Result<(), ConfigError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

fn validate_resource(re: &Regex, schema: &ResourceSchema) -> Result<(), ConfigError> {
    check_identifier(re, "path segment", schema.path_segment)?;
    check_identifier(re, "table", schema.table_name)?;
    check_identifier(re, "primary key", schema.primary_key)?;

    let mut names = HashSet::new();
    for field in schema.fields {
        check_identifier(re, "field", field.name)?;
        check_identifier(re, "pg type", field.pg_type)?;
        if field.name == schema.primary_key {
            return Err(ConfigError::Validation(format!(
                "{}: primary key '{}' must not be listed as a field",
                schema.table_name, field.name
            )));
        }
        if !names.insert(field.name) {
            return Err(ConfigError::Validation(format!(
                "{}: duplicate field '{}'",
                schema.table_name, field.name
            )));
        }
    }
    if schema.required_fields().next().is_none() {
        return Err(ConfigError::Validation(format!(
            "{}: at least one required field",
            schema.table_name
        )));
    }
    Ok(())
}

pub fn validate(registry: &ResourceRegistry) -> Result<(), ConfigError> {
    let re = identifier_pattern()?;
    let mut path_segments = HashSet::new();
    for schema in &registry.resources {
        validate_resource(&re, schema)?;
        if !path_segments.insert(schema.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(schema.path_segment.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldDef, ResourceMessages, QUESTOES, USUARIOS};

    const MESSAGES: ResourceMessages = ResourceMessages {
        not_found: "x",
        created: "x",
        updated: "x",
        deleted: "x",
    };

    #[test]
    fn builtin_registry_is_valid() {
        validate(&ResourceRegistry::builtin()).unwrap();
    }

    #[test]
    fn rejects_duplicate_path_segments() {
        let registry = ResourceRegistry::new(vec![&USUARIOS, &QUESTOES, &USUARIOS]);
        assert!(matches!(
            validate(&registry),
            Err(ConfigError::DuplicatePathSegment(p)) if p == "usuarios"
        ));
    }

    #[test]
    fn rejects_unsafe_table_name() {
        static BAD: ResourceSchema = ResourceSchema {
            path_segment: "bad",
            table_name: "bad; DROP TABLE usuarios",
            primary_key: "id",
            fields: &[FieldDef::required("nome", "text")],
            messages: MESSAGES,
        };
        let registry = ResourceRegistry::new(vec![&BAD]);
        assert!(matches!(
            validate(&registry),
            Err(ConfigError::InvalidIdentifier { kind: "table", .. })
        ));
    }

    #[test]
    fn rejects_schema_without_required_fields() {
        static OPTIONAL_ONLY: ResourceSchema = ResourceSchema {
            path_segment: "notas",
            table_name: "notas",
            primary_key: "id",
            fields: &[FieldDef::optional("texto", "text")],
            messages: MESSAGES,
        };
        let registry = ResourceRegistry::new(vec![&OPTIONAL_ONLY]);
        assert!(matches!(validate(&registry), Err(ConfigError::Validation(_))));
    }
}
