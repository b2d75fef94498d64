/// Declared ahead of every fragment so any module can use `JSON` fields.
pub const JSON_SCALAR: &str = "scalar JSON";

/// Concatenates type fragments verbatim and folds the query and mutation
/// fragments into a single `Query` and a single `Mutation` root type.
///
/// `Mutation` is left out when no fragment contributes a mutation field, as an
/// empty root type would not parse.
pub fn merge_type_defs<T, Q, M>(type_defs: &[T], queries: &[Q], mutations: &[M]) -> String
where
    T: AsRef<str>,
    Q: AsRef<str>,
    M: AsRef<str>,
{
    let mut doc = String::from(JSON_SCALAR);
    doc.push('\n');
    for fragment in type_defs {
        doc.push_str(fragment.as_ref());
        doc.push('\n');
    }

    doc.push_str(&root_type("Query", queries));
    if mutations.iter().any(|m| !m.as_ref().trim().is_empty()) {
        doc.push('\n');
        doc.push_str(&root_type("Mutation", mutations));
    }
    doc
}

fn root_type<S: AsRef<str>>(name: &str, fields: &[S]) -> String {
    let body = fields
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join("\n    ");
    format!("type {name} {{\n    {body}\n}}\n")
}
