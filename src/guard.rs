//! SQL safety guard
//!
//! Pure text-level checks over candidate SQL produced by the AI translator.
//! The guard is not a SQL parser: it scans the statement text for the known
//! injection vectors (non-SELECT statements, statement chaining, DML/DDL
//! keywords) and caps result size by injecting a LIMIT clause. Keywords
//! hidden inside quoted string literals are not specially handled; tightening
//! that is a policy decision, not a bug fix.

/// Keywords that must never appear as a statement token in generated SQL.
///
/// Fixed-order slice so rejection messages are deterministic when a statement
/// contains more than one forbidden keyword.
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "drop", "delete", "update", "insert", "alter", "truncate", "create", "grant", "revoke",
];

/// Why the guard rejected a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    /// The statement does not start with SELECT.
    #[error("Only SELECT queries are allowed")]
    NotASelect,

    /// The statement contains a semicolon other than a single trailing
    /// terminator, i.e. attempts statement chaining.
    #[error("Multiple statements are not allowed")]
    MultipleStatements,

    /// A forbidden keyword was found as a token.
    #[error("Forbidden keyword detected: {0}")]
    ForbiddenKeyword(String),
}

/// Validate a candidate SQL statement against the safety policy.
///
/// Checks run in a fixed order and the first failure wins: statement type,
/// then multi-statement, then forbidden keywords. The order is part of the
/// contract because it determines the user-facing error message.
///
/// Keyword matching is deliberately crude: a keyword counts only when
/// followed by a space (or additionally preceded by a newline), so an
/// identifier like `updated_at` does not trip the `update` check.
pub fn validate(sql: &str) -> Result<(), RejectionReason> {
    let normalized = sql.trim().to_lowercase();

    if !normalized.starts_with("select") {
        return Err(RejectionReason::NotASelect);
    }

    // A single trailing terminator is tolerated; any other semicolon is
    // treated as statement chaining.
    let without_terminator = normalized.strip_suffix(';').unwrap_or(&normalized);
    if without_terminator.contains(';') {
        return Err(RejectionReason::MultipleStatements);
    }

    for kw in FORBIDDEN_KEYWORDS {
        let spaced = format!("{} ", kw);
        let after_newline = format!("\n{} ", kw);
        if normalized.contains(&spaced) || normalized.contains(&after_newline) {
            return Err(RejectionReason::ForbiddenKeyword((*kw).to_string()));
        }
    }

    Ok(())
}

/// Cap result size by appending `LIMIT max_rows` when the statement carries
/// no limit of its own.
///
/// If the text already contains the `limit` token anywhere (any case) the
/// statement is returned unchanged; the guard does not verify the existing
/// value, it only avoids double-injecting. Otherwise the trailing terminator
/// is normalized to exactly one `;` and the limit clause is spliced in before
/// it. Idempotent for any input.
pub fn enforce_limit(sql: &str, max_rows: usize) -> String {
    let trimmed = sql.trim();
    if trimmed.to_lowercase().contains("limit") {
        return trimmed.to_string();
    }

    let body = trimmed.strip_suffix(';').unwrap_or(trimmed);
    format!("{}\nLIMIT {};", body, max_rows)
}
