// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! SPARQL text for label lookups

use std::fmt::Write;

/// Projected variable holding the subject URI
pub const VAR_URI: &str = "uri";
/// Projected variable holding the label literal
pub const VAR_LABEL: &str = "label";
/// Projected variable holding the label language tag
pub const VAR_LANG: &str = "lang";

/// True if `iri` can be written as `<iri>` without breaking the query.
pub fn is_embeddable_iri(iri: &str) -> bool {
    !iri.is_empty()
        && !iri.chars().any(|c| {
            c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
        })
}

/// Escape a string for use inside a double-quoted SPARQL literal.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the label `SELECT` for one batch.
///
/// Predicates are bound together with their rank and results are ordered
/// worst rank first, so under last-write-wins merging the best-ranked
/// predicate of a language ends up as the label. Only untagged literals and
/// the given languages are returned. IRIs that cannot be embedded are
/// skipped; `None` is returned when nothing is left to ask for.
pub fn label_query<S: AsRef<str>>(
    uris: &[S],
    predicates: &[String],
    languages: &[&str],
) -> Option<String> {
    let values: Vec<&str> = uris
        .iter()
        .map(AsRef::as_ref)
        .filter(|uri| is_embeddable_iri(uri))
        .collect();
    if values.is_empty() || predicates.is_empty() {
        return None;
    }

    let mut query = String::with_capacity(256 + values.len() * 64);
    let _ = writeln!(query, "SELECT ?{} ?{} ?{} WHERE {{", VAR_URI, VAR_LABEL, VAR_LANG);

    query.push_str("  VALUES ?uri {");
    for uri in &values {
        let _ = write!(query, " <{}>", uri);
    }
    query.push_str(" }\n");

    query.push_str("  VALUES (?p ?rank) {");
    for (rank, predicate) in predicates
        .iter()
        .filter(|p| is_embeddable_iri(p))
        .enumerate()
    {
        let _ = write!(query, " (<{}> {})", predicate, rank);
    }
    query.push_str(" }\n");

    query.push_str("  ?uri ?p ?label .\n");
    query.push_str("  FILTER(isLiteral(?label))\n");
    query.push_str("  BIND(LANG(?label) AS ?lang)\n");

    let mut conditions = vec!["?lang = \"\"".to_string()];
    conditions.extend(
        languages
            .iter()
            .map(|lang| format!("?lang = \"{}\"", escape_literal(lang))),
    );
    let _ = writeln!(query, "  FILTER({})", conditions.join(" || "));

    query.push_str("}\nORDER BY DESC(?rank)");
    Some(query)
}
