//! Static resource schemas: table, primary key, fields and the messages each resource reports.

use std::collections::HashMap;

/// One persisted column of a resource.
#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    /// PostgreSQL type used to cast the bound parameter (e.g. "text").
    pub pg_type: &'static str,
    /// Must be present and truthy on create.
    pub required: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, pg_type: &'static str) -> Self {
        FieldDef { name, pg_type, required: true }
    }

    pub const fn optional(name: &'static str, pg_type: &'static str) -> Self {
        FieldDef { name, pg_type, required: false }
    }
}

/// Human-readable messages returned by the API for one resource.
#[derive(Clone, Copy, Debug)]
pub struct ResourceMessages {
    pub not_found: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ResourceSchema {
    pub path_segment: &'static str,
    pub table_name: &'static str,
    pub primary_key: &'static str,
    /// Persisted fields in declared order; excludes the primary key (assigned by the store).
    pub fields: &'static [FieldDef],
    pub messages: ResourceMessages,
}

impl ResourceSchema {
    /// Field names that must be present and truthy on create, in declared order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldDef] = self.fields;
        fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// All persisted field names in declared order.
    pub fn all_fields(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldDef] = self.fields;
        fields.iter().map(|f| f.name)
    }
}

pub const USUARIOS: ResourceSchema = ResourceSchema {
    path_segment: "usuarios",
    table_name: "usuarios",
    primary_key: "id",
    fields: &[
        FieldDef::required("nome", "text"),
        FieldDef::required("email", "text"),
        FieldDef::required("senha", "text"),
        FieldDef::optional("imagem", "text"),
    ],
    messages: ResourceMessages {
        not_found: "Usuário não encontrado",
        created: "Usuário criado com sucesso!",
        updated: "Usuário atualizado com sucesso!",
        deleted: "Usuário excluído com sucesso!!",
    },
};

pub const QUESTOES: ResourceSchema = ResourceSchema {
    path_segment: "questoes",
    table_name: "questoes",
    primary_key: "id",
    fields: &[
        FieldDef::required("enunciado", "text"),
        FieldDef::required("disciplina", "text"),
        FieldDef::required("tema", "text"),
        FieldDef::required("nivel", "text"),
        FieldDef::optional("imagem", "text"),
    ],
    messages: ResourceMessages {
        not_found: "Questão não encontrada",
        created: "Questão criada com sucesso!",
        updated: "Questão atualizada com sucesso!",
        deleted: "Questão excluida com sucesso!!",
    },
};

/// Resources served by the API, looked up by path segment.
#[derive(Clone, Debug)]
pub struct ResourceRegistry {
    pub resources: Vec<&'static ResourceSchema>,
    by_path: HashMap<&'static str, &'static ResourceSchema>,
}

impl ResourceRegistry {
    pub fn new(resources: Vec<&'static ResourceSchema>) -> Self {
        let by_path = resources.iter().map(|r| (r.path_segment, *r)).collect();
        ResourceRegistry { resources, by_path }
    }

    /// The two resources of this API: usuarios and questoes.
    pub fn builtin() -> Self {
        Self::new(vec![&USUARIOS, &QUESTOES])
    }

    pub fn resource_by_path(&self, path: &str) -> Option<&'static ResourceSchema> {
        self.by_path.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_field_views_keep_declared_order() {
        let required: Vec<_> = USUARIOS.required_fields().collect();
        assert_eq!(required, ["nome", "email", "senha"]);
        let all: Vec<_> = QUESTOES.all_fields().collect();
        assert_eq!(all, ["enunciado", "disciplina", "tema", "nivel", "imagem"]);
    }

    #[test]
    fn registry_resolves_by_path_segment() {
        let registry = ResourceRegistry::builtin();
        assert_eq!(registry.resource_by_path("questoes").map(|r| r.table_name), Some("questoes"));
        assert!(registry.resource_by_path("respostas").is_none());
    }
}
