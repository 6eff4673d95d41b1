//! Snapshot of the built-in rule catalog: codes, names, groups, default
//! severities and option keys, in registration order.

use insta::assert_snapshot;
use querylint_core::global_registry;

#[test]
fn rule_catalog() {
    let catalog = global_registry()
        .metas()
        .map(|meta| {
            let line = format!(
                "{} | {} | {} | {} | {}",
                meta.code,
                meta.name,
                meta.group,
                meta.default_severity,
                meta.config_keys.join(", ")
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n");

    assert_snapshot!("rule_catalog", catalog);
}

#[test]
fn rule_metadata_is_well_formed() {
    for meta in global_registry().metas() {
        let prefix = format!("LINT_{}_", meta.group.code_prefix());
        assert!(meta.code.starts_with(&prefix), "{}", meta.code);
        assert!(
            meta.name.starts_with(&format!("{}.", meta.group)),
            "{} is outside its group",
            meta.name
        );
        assert!(meta.description.ends_with('.'), "{}", meta.code);
    }
}
