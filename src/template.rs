// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Placeholder substitution for manifest documents.

use crate::config::Substitutions;
use crate::error::{KankubeError, Result};

/// Resolve every `{key}` placeholder in `document` against `substitutions`.
///
/// Replacement values are inserted verbatim and never re-scanned, so a value
/// containing braces cannot introduce new placeholders. Brace sequences that
/// do not form a `{identifier}` token (empty braces, spaces, unclosed braces)
/// pass through untouched. A placeholder whose key is absent from the table
/// fails the whole resolution; `source` identifies the document in the error.
pub fn resolve(source: &str, document: &str, substitutions: &Substitutions) -> Result<String> {
    let mut resolved = String::with_capacity(document.len());
    let mut rest = document;

    while let Some(open) = rest.find('{') {
        resolved.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                let key = &after[..close];
                match substitutions.get(key) {
                    Some(value) => resolved.push_str(value),
                    None => {
                        return Err(KankubeError::UnresolvedPlaceholder {
                            key: key.to_string(),
                            document: source.to_string(),
                        })
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                // Not a placeholder token, emit the brace and keep scanning
                resolved.push('{');
                rest = after;
            }
        }
    }

    resolved.push_str(rest);
    Ok(resolved)
}

/// A placeholder key is a non-empty run of ASCII alphanumerics, `_` or `-`
fn is_identifier(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_substitutions(pairs: &[(&str, &str)]) -> Substitutions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_no_placeholders_is_identity() {
        let substitutions = make_substitutions(&[("unused", "value")]);
        let document = "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n";

        let resolved = resolve("service.yml", document, &substitutions).unwrap();

        assert_eq!(resolved, document);
    }

    #[test]
    fn test_resolve_substitutes_image() {
        let substitutions = make_substitutions(&[(
            "my-deployment-image",
            "gcr.io/google_containers/defaultbackend:1.0",
        )]);

        let resolved = resolve(
            "deployment.yml",
            "image: {my-deployment-image}",
            &substitutions,
        )
        .unwrap();

        assert_eq!(
            resolved,
            "image: gcr.io/google_containers/defaultbackend:1.0"
        );
    }

    #[test]
    fn test_resolve_replaces_every_occurrence() {
        let substitutions = make_substitutions(&[("app", "frontend")]);

        let resolved = resolve("labels.yml", "name: {app}\napp: {app}\n", &substitutions).unwrap();

        assert_eq!(resolved, "name: frontend\napp: frontend\n");
    }

    #[test]
    fn test_resolve_missing_key_fails_with_key_and_document() {
        let substitutions = make_substitutions(&[("present", "value")]);

        let err = resolve("broken.yml", "image: {missing}", &substitutions).unwrap_err();

        match err {
            KankubeError::UnresolvedPlaceholder { key, document } => {
                assert_eq!(key, "missing");
                assert_eq!(document, "broken.yml");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_resolve_leaves_non_token_braces_verbatim() {
        let substitutions = make_substitutions(&[]);
        let document = "resources: {}\nselector: {app label}\ndangling: {\n";

        let resolved = resolve("service.yml", document, &substitutions).unwrap();

        assert_eq!(resolved, document);
    }

    #[test]
    fn test_resolve_values_are_not_rescanned() {
        let substitutions = make_substitutions(&[("outer", "{inner}")]);

        let resolved = resolve("doc.yml", "value: {outer}", &substitutions).unwrap();

        assert_eq!(resolved, "value: {inner}");
    }

    #[test]
    fn test_resolve_is_idempotent_on_resolved_output() {
        let substitutions = make_substitutions(&[("port", "8080")]);
        let resolved = resolve("svc.yml", "port: {port}", &substitutions).unwrap();

        let again = resolve("svc.yml", &resolved, &make_substitutions(&[])).unwrap();

        assert_eq!(again, resolved);
    }

    #[test]
    fn test_resolve_adjacent_and_mixed_tokens() {
        let substitutions = make_substitutions(&[("a", "1"), ("b", "2")]);

        let resolved = resolve("doc.yml", "{a}{b} and { } and {a}", &substitutions).unwrap();

        assert_eq!(resolved, "12 and { } and 1");
    }
}
