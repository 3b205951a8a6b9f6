//! Reference configuration files, one per supported language.

pub const GO_TEMPLATE: &str = include_str!("../templates/hooks.config.go");
pub const RUST_TEMPLATE: &str = include_str!("../templates/hooks.config.rust");

const TEMPLATES: &[(&str, &str)] = &[("go", GO_TEMPLATE), ("rust", RUST_TEMPLATE)];

pub fn available_languages() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(language, _)| *language)
}

/// Look up a template by language tag (case-insensitive).
pub fn template_for(language: &str) -> Option<&'static str> {
    let normalized = language.trim().to_ascii_lowercase();
    let language = match normalized.as_str() {
        "golang" => "go",
        "rs" => "rust",
        other => other,
    };

    TEMPLATES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, template)| *template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_config;

    #[test]
    fn test_template_lookup() {
        assert_eq!(template_for("go"), Some(GO_TEMPLATE));
        assert_eq!(template_for("Golang"), Some(GO_TEMPLATE));
        assert_eq!(template_for(" RUST "), Some(RUST_TEMPLATE));
        assert_eq!(template_for("rs"), Some(RUST_TEMPLATE));
        assert_eq!(template_for("cobol"), None);
    }

    #[test]
    fn test_available_languages() {
        assert_eq!(available_languages().collect::<Vec<_>>(), vec!["go", "rust"]);
    }

    #[test]
    fn test_every_template_loads() {
        for language in available_languages() {
            let template = template_for(language).unwrap();
            let config = parse_config(template).unwrap();
            assert_eq!(config.language.as_deref(), Some(language));
            assert!(config.threshold <= 100);
            assert!(config.custom_protected_files.is_empty());
        }
    }

    #[test]
    fn test_rust_template_values() {
        assert!(RUST_TEMPLATE.starts_with("# verify-loop quality gate configuration\n"));

        let config = parse_config(RUST_TEMPLATE).unwrap();
        assert_eq!(config.total_weight(), 100);
        assert!(config.imports_cmd.is_empty());
        assert_eq!(config.lint_cmd, "cargo clippy --workspace --all-targets -- -D warnings");
    }
}
