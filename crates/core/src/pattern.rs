//! Pattern resolution
//!
//! Task names are namespaced strings whose segments are joined by `:`
//! (e.g. `append:a:c`). A pattern selects declared tasks by name: `*`
//! matches exactly one segment (and may combine with literal characters
//! inside a segment, e.g. `lint-*`), `**` matches zero or more whole
//! segments, and a pattern without any wildcard must equal a declared name
//! exactly. Resolution is all-or-nothing: a pattern that matches no declared
//! task fails the entire invocation before anything is spawned.

use globset::{GlobBuilder, GlobMatcher};

use crate::manifest::TaskDeclaration;
use crate::types::{GlobrunError, GlobrunResult};

/// Separator between name segments in task names and patterns
pub const SEGMENT_SEPARATOR: char = ':';

/// Compiled form of one user-supplied pattern
enum Matcher {
    Exact(String),
    Glob(GlobMatcher),
}

impl Matcher {
    fn compile(pattern: &str) -> GlobrunResult<Self> {
        if !pattern.contains('*') {
            return Ok(Matcher::Exact(pattern.to_string()));
        }

        // Segments map onto path components so that globset's
        // gitignore-style wildcards give exactly the semantics we need:
        // with a literal separator, `*` stays inside one segment while
        // `**` crosses zero or more of them.
        let glob = GlobBuilder::new(&to_path_form(pattern))
            .literal_separator(true)
            .build()
            .map_err(|e| {
                GlobrunError::Config(format!("Invalid task pattern '{pattern}': {e}"))
            })?;

        Ok(Matcher::Glob(glob.compile_matcher()))
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(exact) => exact == name,
            Matcher::Glob(glob) => glob.is_match(to_path_form(name)),
        }
    }
}

fn to_path_form(name: &str) -> String {
    name.replace(SEGMENT_SEPARATOR, "/")
}

/// Resolve a list of patterns against the declared tasks.
///
/// Each pattern independently yields the declared tasks it matches, in
/// declaration order. The per-pattern results are concatenated in input
/// order and deduplicated by name keeping the first occurrence, so a task
/// named explicitly and covered again by a later wildcard runs only once,
/// at its first position.
pub fn resolve_patterns<'a>(
    patterns: &[String],
    tasks: &'a [TaskDeclaration],
) -> GlobrunResult<Vec<&'a TaskDeclaration>> {
    let mut matched: Vec<&TaskDeclaration> = Vec::new();

    for pattern in patterns {
        let matcher = Matcher::compile(pattern)?;

        let hits: Vec<&TaskDeclaration> = tasks
            .iter()
            .filter(|task| matcher.is_match(&task.name))
            .collect();

        if hits.is_empty() {
            return Err(GlobrunError::NotFound(pattern.clone()));
        }

        for task in hits {
            if !matched.iter().any(|seen| seen.name == task.name) {
                matched.push(task);
            }
        }
    }

    Ok(matched)
}
