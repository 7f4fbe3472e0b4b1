//! Source checks for `src/`, run as tests.
//!
//! Library code must not crash the host page and must not print. Numeric casts
//! and default fallbacks stay rare and visible. Environment access lives in
//! `config.rs`, randomness in `palette.rs`. Error codes are stable wire values,
//! so each one is spelled once.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

struct SourceFile {
    name: String,
    content: String,
    is_test: bool,
}

impl SourceFile {
    /// Lines outside doc and line comments.
    fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.lines().enumerate().filter(|(_, l)| !l.trim_start().starts_with("//")).map(|(i, l)| (i + 1, l))
    }
}

fn src_files() -> Vec<SourceFile> {
    let Ok(entries) = fs::read_dir(Path::new("src")) else {
        return Vec::new();
    };
    let mut files: Vec<SourceFile> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "rs"))
        .filter_map(|p| {
            let name = p.file_name()?.to_string_lossy().into_owned();
            let content = fs::read_to_string(&p).ok()?;
            Some(SourceFile { is_test: name.ends_with("_test.rs"), name, content })
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

fn library_files() -> Vec<SourceFile> {
    src_files().into_iter().filter(|f| !f.is_test).collect()
}

/// `file:line` for every library code line containing any of `patterns`.
fn occurrences(files: &[SourceFile], patterns: &[&str]) -> Vec<String> {
    files
        .iter()
        .flat_map(move |f| {
            f.code_lines()
                .filter(move |(_, l)| patterns.iter().any(|p| l.contains(p)))
                .map(move |(n, _)| format!("{}:{n}", f.name))
        })
        .collect()
}

// =============================================================
// Budgets
// =============================================================

struct Budget {
    what: &'static str,
    patterns: &'static [&'static str],
    max: usize,
}

const BUDGETS: &[Budget] = &[
    Budget {
        what: "panicking calls",
        patterns: &[".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("],
        max: 0,
    },
    Budget { what: "discarded results", patterns: &["let _ =", ".ok()"], max: 0 },
    Budget { what: "terminal output (use tracing)", patterns: &["println!(", "eprintln!(", "dbg!("], max: 0 },
    Budget { what: "dead code allows", patterns: &["#[allow(dead_code)]"], max: 0 },
    // Artifact line index to offset.
    Budget { what: "numeric `as` casts", patterns: &[" as f64", " as f32", " as usize", " as u32", " as i32", " as i64"], max: 1 },
    // Empty palette table fallback.
    Budget { what: "`unwrap_or_default` fallbacks", patterns: &["unwrap_or_default()"], max: 1 },
    Budget { what: "unsafe blocks", patterns: &["unsafe "], max: 0 },
];

#[test]
fn library_code_stays_within_budgets() {
    let files = library_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let over: Vec<String> = BUDGETS
        .iter()
        .filter_map(|b| {
            let hits = occurrences(&files, b.patterns);
            (hits.len() > b.max).then(|| format!("{}: found {}, max {}\n  {}", b.what, hits.len(), b.max, hits.join("\n  ")))
        })
        .collect();
    assert!(over.is_empty(), "budget exceeded (fix one before adding one):\n{}", over.join("\n"));
}

#[test]
fn numeric_casts_carry_a_lint_allow() {
    for f in library_files() {
        let lines: Vec<&str> = f.content.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if !line.contains(" as f64") {
                continue;
            }
            let allowed = i > 0 && lines[i - 1].contains("#[allow(clippy::cast_");
            assert!(allowed, "{}:{} casts without a clippy::cast_* allow on the line above", f.name, i + 1);
        }
    }
}

// =============================================================
// Confinement
// =============================================================

fn only_in(patterns: &[&str], allowed: &str) {
    let files: Vec<SourceFile> = library_files().into_iter().filter(|f| f.name != allowed).collect();
    let hits = occurrences(&files, patterns);
    assert!(hits.is_empty(), "{patterns:?} belongs in {allowed} only:\n  {}", hits.join("\n  "));
}

#[test]
fn environment_is_read_only_by_config() {
    only_in(&["std::env", "env::var"], "config.rs");
}

#[test]
fn randomness_is_confined_to_palette() {
    only_in(&["rand::", "use rand"], "palette.rs");
}

// =============================================================
// Layout
// =============================================================

#[test]
fn every_test_file_is_wired_from_its_module() {
    let files = src_files();
    for test in files.iter().filter(|f| f.is_test) {
        let module = test.name.trim_end_matches("_test.rs");
        let parent = files.iter().find(|f| f.name == format!("{module}.rs"));
        let wired = parent.is_some_and(|p| p.content.contains(&format!("#[path = \"{}\"]", test.name)));
        assert!(wired, "{} is never compiled: add #[cfg(test)] #[path] to {module}.rs", test.name);
    }
}

#[test]
fn every_declared_module_has_a_file() {
    let files = src_files();
    let Some(lib) = files.iter().find(|f| f.name == "lib.rs") else {
        panic!("src/lib.rs missing");
    };
    for (n, line) in lib.code_lines() {
        let Some(module) = line.trim().strip_prefix("pub mod ").and_then(|m| m.strip_suffix(';')) else {
            continue;
        };
        let file = format!("{module}.rs");
        assert!(files.iter().any(|f| f.name == file), "lib.rs:{n} declares `{module}` but src/{file} is missing");
    }
}

// =============================================================
// Error codes
// =============================================================

#[test]
fn error_codes_are_well_formed_and_unique() {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for f in library_files() {
        for (n, line) in f.code_lines() {
            let Some(start) = line.find("\"E_") else {
                continue;
            };
            let rest = &line[start + 1..];
            let Some(end) = rest.find('"') else {
                continue;
            };
            let code = &rest[..end];
            let here = format!("{}:{n}", f.name);
            assert!(
                code.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{here}: error code {code} must be upper snake case"
            );
            if let Some(first) = seen.insert(code.to_string(), here.clone()) {
                panic!("{here}: error code {code} already used at {first}");
            }
        }
    }
    assert!(seen.contains_key("E_NOT_FOUND"));
}
