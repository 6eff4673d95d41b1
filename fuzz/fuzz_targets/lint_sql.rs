#![no_main]

use libfuzzer_sys::fuzz_target;
use querylint_core::{lint_sql, Dialect, LintConfig};

const DIALECTS: [Dialect; 4] = [
    Dialect::Generic,
    Dialect::Postgres,
    Dialect::Mysql,
    Dialect::Bigquery,
];

fuzz_target!(|data: &[u8]| {
    let Some((selector, rest)) = data.split_first() else {
        return;
    };
    if let Ok(sql) = std::str::from_utf8(rest) {
        let dialect = DIALECTS[usize::from(*selector) % DIALECTS.len()];
        let _ = lint_sql(sql, dialect, &LintConfig::default());
    }
});
