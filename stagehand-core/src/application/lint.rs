// stagehand-core/src/application/lint.rs

use crate::domain::error::DomainError;
use crate::domain::flow::LintMode;
use sqlparser::dialect::SnowflakeDialect;
use sqlparser::parser::Parser;
use tracing::warn;

/// Parses the rendered statement with the Snowflake dialect.
///
/// In `warn` mode an unparseable statement only logs; in `strict` mode it
/// fails the step before anything reaches the warehouse. The warehouse
/// still has the final word on statements that do parse.
pub fn lint_statement(mode: LintMode, step: &str, sql: &str) -> Result<(), DomainError> {
    if mode == LintMode::Off {
        return Ok(());
    }

    if let Err(e) = Parser::parse_sql(&SnowflakeDialect {}, sql) {
        if mode == LintMode::Strict {
            return Err(DomainError::StatementRejected {
                step: step.to_string(),
                reason: e.to_string(),
            });
        }
        warn!(step, error = %e, "Rendered SQL did not parse cleanly");
    }

    Ok(())
}
