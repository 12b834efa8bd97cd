mod comparators;
mod version_utils;

pub use comparators::{Comparator, Range};
pub use semver::Version;
use version_utils::parse_partial_version;

/// A parsed, canonical range: a list of AND-clauses joined by OR (`||`).
#[derive(Debug, Clone)]
pub struct ValidRange {
    clauses: Vec<Range>,
    allows_prerelease: bool,
}

impl ValidRange {
    pub fn matches(&self, version: &Version) -> bool {
        if !version.pre.is_empty() && !self.allows_prerelease {
            return false;
        }
        self.clauses.iter().any(|clause| clause.matches(version))
    }
}

/// `valid(v)` — parse a concrete version, or ⟂ if `v` is not a fully-qualified semver.
#[must_use]
pub fn valid(v: &str) -> Option<Version> {
    Version::parse(v.trim()).ok()
}

/// `validRange(r)` — parse an npm-style range (caret/tilde/comparators/OR), or ⟂.
pub fn valid_range(r: &str) -> Result<ValidRange, String> {
    let clauses = parse_npm_semver_ranges(r)?;
    let allows_prerelease = r.contains('-');
    Ok(ValidRange {
        clauses,
        allows_prerelease,
    })
}

/// `satisfies(version, range)` — does the concrete version satisfy the range?
#[must_use]
pub fn satisfies(version: &str, range: &str) -> bool {
    let Some(v) = valid(version) else { return false };
    let Ok(parsed_range) = valid_range(range) else {
        return false;
    };
    parsed_range.matches(&v)
}

/// `maxSatisfying(versions, range)` — the greatest concrete version satisfying `range`, or ⟂.
#[must_use]
pub fn max_satisfying<S: AsRef<str>>(versions: &[S], range: &str) -> Option<String> {
    let parsed_range = valid_range(range).ok()?;

    let mut candidates: Vec<(Version, String)> = versions
        .iter()
        .filter_map(|v| valid(v.as_ref()).map(|parsed| (parsed, v.as_ref().to_string())))
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates
        .into_iter()
        .find(|(v, _)| parsed_range.matches(v))
        .map(|(_, s)| s)
}

/// Parse npm-style semver ranges with multiple comparators and OR logic.
fn parse_npm_semver_ranges(range_str: &str) -> Result<Vec<Range>, String> {
    let range_str = range_str.trim();

    if range_str.is_empty() || range_str == "*" {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    let or_clauses: Vec<&str> = range_str.split("||").map(str::trim).collect();
    let mut ranges = Vec::new();

    for clause in or_clauses {
        if clause.is_empty() {
            continue;
        }
        ranges.push(parse_range_clause(clause)?);
    }

    if ranges.is_empty() {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    Ok(ranges)
}

/// Parse a single range clause (e.g., ">=1.2.3 <2.0.0", AND logic within).
fn parse_range_clause(clause: &str) -> Result<Range, String> {
    let clause = clause.trim();

    if clause.is_empty() || clause == "*" {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    let mut comparators = Vec::new();
    let mut remaining = clause;

    while !remaining.is_empty() {
        remaining = remaining.trim();
        if remaining.is_empty() {
            break;
        }

        if let Some(rest) = remaining.strip_prefix(">=") {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::GreaterThanOrEqual(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix("<=") {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::LessThanOrEqual(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix('>') {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::GreaterThan(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix('<') {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::LessThan(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix('^') {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::Compatible(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix('~') {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::Tilde(parse_partial_version(&version_str)?));
            remaining = next;
        } else if let Some(rest) = remaining.strip_prefix('=') {
            let (version_str, next) = extract_version_and_remaining(rest)?;
            comparators.push(Comparator::Exact(parse_partial_version(&version_str)?));
            remaining = next;
        } else {
            let (version_str, next) = extract_version_and_remaining(remaining)?;
            comparators.push(Comparator::Exact(parse_partial_version(&version_str)?));
            remaining = next;
        }
    }

    if comparators.is_empty() {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    Ok(Range::new(comparators))
}

fn extract_version_and_remaining(input: &str) -> Result<(String, &str), String> {
    let input = input.trim_start();

    if input.is_empty() {
        return Err("expected version string but found end of input".to_string());
    }

    let chars: Vec<char> = input.chars().collect();
    let mut end_pos = 0;

    while end_pos < chars.len() {
        let current_char = chars[end_pos];
        if current_char.is_whitespace() {
            break;
        }
        if end_pos > 0 && ['>', '<', '=', '^', '~'].contains(&current_char) {
            break;
        }
        end_pos += 1;
    }

    let version_str = input[..end_pos].trim().to_string();
    let remaining = &input[end_pos..];

    if version_str.is_empty() {
        return Err("empty version string found".to_string());
    }

    Ok((version_str, remaining))
}
