//! Integration tests for the SQL linter.
//!
//! These tests drive the public entry points (`lint_sql`, `analyze`,
//! `Linter`) with the built-in rule catalog and check configuration
//! resolution end to end.

use std::collections::BTreeMap;

use querylint_core::ast::Statement;
use querylint_core::{
    analyze, documentation_url, global_registry, lint_sql, parse_sql, rule_codes, ConfigError,
    Diagnostic, Dialect, LintConfig, LintContext, LintRule, Linter, RegistryError, RuleGroup,
    RuleMeta, RuleRegistry, Severity,
};
use rstest::rstest;

fn run_lint(sql: &str) -> Vec<(String, String)> {
    run_lint_with_config(sql, LintConfig::default())
}

fn run_lint_with_config(sql: &str, config: LintConfig) -> Vec<(String, String)> {
    lint_sql(sql, Dialect::Generic, &config)
        .expect("parse")
        .into_iter()
        .map(|d| (d.code, d.message))
        .collect()
}

fn codes(issues: &[(String, String)], code: &str) -> usize {
    issues.iter().filter(|(c, _)| c == code).count()
}

// =============================================================================
// Integration: diagnostics flow through lint_sql()
// =============================================================================

#[test]
fn lint_diagnostics_carry_code_and_severity() {
    let diagnostics = lint_sql("SELECT 1 UNION SELECT 2", Dialect::Generic, &LintConfig::default())
        .expect("parse");

    let union: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.code == rule_codes::LINT_AM_002)
        .collect();
    assert_eq!(union.len(), 1);
    assert_eq!(union[0].severity, Severity::Warning);
}

#[test]
fn lint_diagnostics_have_statement_index() {
    let diagnostics = lint_sql(
        "SELECT 1; SELECT 1 UNION SELECT 2",
        Dialect::Generic,
        &LintConfig::default(),
    )
    .expect("parse");

    let union: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.code == rule_codes::LINT_AM_002)
        .collect();
    assert_eq!(union.len(), 1);
    assert_eq!(
        union[0].statement_index,
        Some(1),
        "diagnostic should reference the second statement"
    );
}

#[test]
fn every_diagnostic_carries_its_doc_url() {
    let diagnostics = lint_sql(
        "WITH unused AS (SELECT 1) SELECT DISTINCT a FROM t JOIN u ON u.id = t.id GROUP BY a \
         UNION SELECT b FROM v WHERE 1 = 1",
        Dialect::Generic,
        &LintConfig::default(),
    )
    .expect("parse");

    assert!(!diagnostics.is_empty());
    for diagnostic in &diagnostics {
        assert_eq!(
            diagnostic.doc_url.as_deref(),
            Some(documentation_url(&diagnostic.code).as_str())
        );
    }
}

#[test]
fn diagnostics_follow_registry_order() {
    let diagnostics = lint_sql(
        "WITH unused AS (SELECT 1) SELECT DISTINCT a FROM t JOIN u ON u.id = t.id GROUP BY a \
         UNION SELECT b FROM v WHERE 1 = 1",
        Dialect::Generic,
        &LintConfig::default(),
    )
    .expect("parse");

    let registry = global_registry();
    let positions: Vec<usize> = diagnostics
        .iter()
        .map(|d| {
            registry
                .iter()
                .position(|rule| rule.meta().code == d.code)
                .expect("diagnostic from a registered rule")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn parse_errors_are_returned() {
    let err = lint_sql("SELECT * FROM", Dialect::Generic, &LintConfig::default()).unwrap_err();
    assert_eq!(err.dialect, Some(Dialect::Generic));
}

#[test]
fn non_query_statements_produce_nothing() {
    assert!(run_lint("DROP TABLE t").is_empty());
}

#[test]
fn analyze_checks_a_single_parsed_statement() {
    let statements = parse_sql("SELECT * FROM a JOIN b ON b.id = a.id").expect("parse");
    let diagnostics = analyze(&statements[0], Dialect::Generic, &LintConfig::default());
    assert!(diagnostics
        .iter()
        .any(|d| d.code == rule_codes::LINT_ST_008 && d.statement_index.is_none()));
}

// =============================================================================
// Representative rules through the full catalog
// =============================================================================

#[rstest]
#[case("WITH c AS (SELECT 1) SELECT * FROM t", rule_codes::LINT_ST_001, 1)]
#[case("WITH c AS (SELECT id FROM t) SELECT * FROM c", rule_codes::LINT_ST_001, 0)]
#[case(
    "WITH c1 AS (SELECT 1 AS a), c2 AS (SELECT * FROM c1) SELECT * FROM c2",
    rule_codes::LINT_ST_001,
    0
)]
#[case("SELECT a, b FROM t UNION SELECT a FROM u", rule_codes::LINT_AM_004, 1)]
#[case("SELECT * FROM t UNION SELECT a, b FROM u", rule_codes::LINT_AM_004, 0)]
#[case("SELECT * FROM t a JOIN u a ON a.x = a.y", rule_codes::LINT_AL_002, 1)]
#[case("SELECT * FROM t a JOIN u b ON a.x = b.y", rule_codes::LINT_AL_002, 0)]
#[case("SELECT * FROM a JOIN b ON b.id = a.id", rule_codes::LINT_ST_008, 1)]
#[case("SELECT * FROM a JOIN b ON a.id = b.id", rule_codes::LINT_ST_008, 0)]
#[case("SELECT * FROM t WHERE 1=1", rule_codes::LINT_ST_009, 1)]
#[case("SELECT * FROM t WHERE 1=1 AND x>0", rule_codes::LINT_ST_009, 1)]
#[case("SELECT * FROM t WHERE x=1", rule_codes::LINT_ST_009, 0)]
fn representative_rules(#[case] sql: &str, #[case] code: &str, #[case] expected: usize) {
    let issues = run_lint(sql);
    assert_eq!(codes(&issues, code), expected, "{sql}: {issues:?}");
}

#[test]
fn column_count_mismatch_names_branch_and_counts() {
    let issues = run_lint("SELECT a, b FROM t UNION SELECT a FROM u");
    let (_, message) = issues
        .iter()
        .find(|(code, _)| code == rule_codes::LINT_AM_004)
        .expect("column count diagnostic");
    assert!(message.contains("branch 2"), "{message}");
    assert!(message.contains("1 vs 2"), "{message}");
}

#[test]
fn unused_cte_message_names_the_cte() {
    let issues = run_lint("WITH c AS (SELECT 1) SELECT * FROM t");
    assert!(issues
        .iter()
        .any(|(code, message)| code == rule_codes::LINT_ST_001 && message.contains("'c'")));
}

// =============================================================================
// Configuration: enable and disable
// =============================================================================

#[rstest]
#[case("LINT_AM_002")]
#[case("lint_am_002")]
#[case("ambiguous.union")]
#[case("Ambiguous.Union")]
fn disabled_rule_not_reported(#[case] reference: &str) {
    let issues = run_lint_with_config(
        "SELECT 1\nUNION\nSELECT 2\n",
        LintConfig {
            disabled_rules: vec![reference.to_string()],
            ..LintConfig::default()
        },
    );
    assert_eq!(codes(&issues, rule_codes::LINT_AM_002), 0, "{issues:?}");
}

#[test]
fn linter_disabled_globally() {
    let issues = run_lint_with_config(
        "SELECT 1 UNION SELECT 2",
        LintConfig {
            enabled: false,
            ..LintConfig::default()
        },
    );
    assert!(issues.is_empty(), "disabled linter should produce nothing");
}

#[test]
fn disabled_group_removes_its_rules() {
    let issues = run_lint_with_config(
        "SELECT DISTINCT a FROM t GROUP BY a UNION SELECT b FROM u",
        LintConfig {
            disabled_groups: vec![RuleGroup::Ambiguous],
            ..LintConfig::default()
        },
    );
    assert!(
        !issues.iter().any(|(code, _)| code.starts_with("LINT_AM_")),
        "{issues:?}"
    );
}

#[test]
fn enabled_rule_overrides_disabled_group() {
    let issues = run_lint_with_config(
        "SELECT DISTINCT a FROM t GROUP BY a UNION SELECT b FROM u",
        LintConfig {
            disabled_groups: vec![RuleGroup::Ambiguous],
            enabled_rules: vec!["ambiguous.union".to_string()],
            ..LintConfig::default()
        },
    );
    assert_eq!(codes(&issues, rule_codes::LINT_AM_002), 1);
    assert_eq!(codes(&issues, rule_codes::LINT_AM_001), 0);
}

#[test]
fn explicit_disable_beats_explicit_enable() {
    let issues = run_lint_with_config(
        "SELECT 1 UNION SELECT 2",
        LintConfig {
            enabled_rules: vec!["LINT_AM_002".to_string()],
            disabled_rules: vec!["ambiguous.union".to_string()],
            ..LintConfig::default()
        },
    );
    assert_eq!(codes(&issues, rule_codes::LINT_AM_002), 0);
}

#[test]
fn rule_options_from_json_config() {
    let config = LintConfig::from_json_str(
        r#"{"ruleConfigs": {"aliasing.length": {"max_alias_length": 3}}}"#,
    )
    .expect("valid config");

    let issues = run_lint_with_config("SELECT c.id FROM users AS customers", config);
    assert_eq!(codes(&issues, rule_codes::LINT_AL_004), 1);
    assert_eq!(
        codes(&run_lint("SELECT c.id FROM users AS customers"), rule_codes::LINT_AL_004),
        0
    );
}

#[test]
fn unknown_option_keys_are_ignored() {
    let config = LintConfig::from_json_str(
        r#"{"ruleConfigs": {"LINT_ST_009": {"no_such_key": true}}}"#,
    )
    .expect("valid config");
    let issues = run_lint_with_config("SELECT * FROM t WHERE 1 = 1", config);
    assert_eq!(codes(&issues, rule_codes::LINT_ST_009), 1);
}

#[test]
fn severity_override_applies() {
    let config = LintConfig {
        rule_severities: BTreeMap::from([("LINT_AM_002".to_string(), Severity::Error)]),
        ..LintConfig::default()
    };
    let diagnostics =
        lint_sql("SELECT 1 UNION SELECT 2", Dialect::Generic, &config).expect("parse");
    let union = diagnostics
        .iter()
        .find(|d| d.code == rule_codes::LINT_AM_002)
        .expect("union diagnostic");
    assert_eq!(union.severity, Severity::Error);
}

#[test]
fn config_json_uses_camel_case() {
    let config = LintConfig::from_json_str(
        r#"{"enabled": true, "disabledGroups": ["references"], "disabledRules": ["LINT_CV_001"]}"#,
    )
    .expect("valid config");
    assert_eq!(config.disabled_groups, vec![RuleGroup::References]);
    assert_eq!(config.disabled_rules, vec!["LINT_CV_001".to_string()]);
}

#[test]
fn config_validation_reports_unknown_rules() {
    let config = LintConfig {
        disabled_rules: vec!["structure.no_such_rule".to_string()],
        ..LintConfig::default()
    };
    let err = config.validate(global_registry()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRule(name) if name == "structure.no_such_rule"));
    assert!(LintConfig::default().validate(global_registry()).is_ok());
}

// =============================================================================
// Registry and fault isolation
// =============================================================================

static EXPLODING: RuleMeta = RuleMeta {
    code: "LINT_ZZ_001",
    name: "custom.exploding",
    group: RuleGroup::Structure,
    description: "Panics on every statement.",
    default_severity: Severity::Error,
    config_keys: &[],
};

static COUNTING: RuleMeta = RuleMeta {
    code: "LINT_ZZ_002",
    name: "custom.counting",
    group: RuleGroup::Structure,
    description: "Reports every statement.",
    default_severity: Severity::Info,
    config_keys: &[],
};

struct Exploding;

impl LintRule for Exploding {
    fn meta(&self) -> &'static RuleMeta {
        &EXPLODING
    }

    fn check(&self, _statement: &Statement, _ctx: &LintContext) -> Vec<Diagnostic> {
        panic!("rule failure");
    }
}

struct Counting;

impl LintRule for Counting {
    fn meta(&self) -> &'static RuleMeta {
        &COUNTING
    }

    fn check(&self, _statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        vec![ctx.diagnostic("statement seen")]
    }
}

#[test]
fn panicking_rule_does_not_abort_analysis() {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(Exploding)).unwrap();
    registry.register(Box::new(Counting)).unwrap();

    let statements = parse_sql("SELECT 1; SELECT 2").unwrap();
    let diagnostics = Linter::with_registry(&registry, LintConfig::default())
        .check_statements(&statements, Dialect::Generic);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.code == "LINT_ZZ_002"));
}

#[test]
fn duplicate_rule_code_is_rejected() {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(Counting)).unwrap();
    assert_eq!(
        registry.register(Box::new(Counting)),
        Err(RegistryError::DuplicateRule {
            code: "LINT_ZZ_002".to_string()
        })
    );
}

#[test]
fn global_registry_is_initialized_once() {
    let first = global_registry();
    let second = global_registry();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.len(), 33);
}

#[test]
fn registry_indexes_rules_by_group() {
    let registry = global_registry();
    for group in RuleGroup::ALL {
        let prefix = format!("LINT_{}_", group.code_prefix());
        assert!(registry.group(group).count() > 0, "{group} has no rules");
        assert!(registry
            .group(group)
            .all(|rule| rule.meta().code.starts_with(&prefix)));
    }
}

#[test]
fn registry_lookup_by_code_or_name() {
    let registry = global_registry();
    let by_code = registry.get("lint_st_001").expect("by code");
    let by_name = registry.get("structure.unused_cte").expect("by name");
    assert_eq!(by_code.meta().code, by_name.meta().code);
}
