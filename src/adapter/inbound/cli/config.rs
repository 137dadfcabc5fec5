//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::distribution::DistributionPolicy;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `config validate`.
///
/// Loading already validated the file; reaching here means it passed.
pub fn execute_validate(path: &Path) -> Result<()> {
    if output::is_json() {
        return output::json_output(
            "config.validate",
            &json!({ "valid": true, "path": path.display().to_string(), "exists": path.exists() }),
        );
    }
    if path.exists() {
        output::success(&format!("{} is valid", path.display()));
    } else {
        output::success("Defaults are valid");
        output::note(&format!("{} not found, using defaults", path.display()));
    }
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    let policy = config.settlement.policy()?;
    if output::is_json() {
        return output::json_output(
            "config.show",
            &json!({
                "logging": { "level": config.logging.level, "format": config.logging.format },
                "ledger": { "database": config.ledger.database, "utc_offset": config.ledger.utc_offset },
                "archive": { "enabled": config.archive.enabled, "time": config.archive.time },
                "settlement": policy,
                "parser": {
                    "venue_keywords": config.parser.venue_keywords,
                    "code_keywords": config.parser.code_keywords,
                },
                "history": { "capacity": config.history.capacity },
            }),
        );
    }

    output::section("Ledger");
    output::field("Database", &config.ledger.database);
    output::field("UTC offset", &config.ledger.utc_offset);

    output::section("Archive");
    output::field("Enabled", config.archive.enabled);
    output::field("Time", &config.archive.time);

    output::section("Settlement");
    output::field("Policy", policy.name());
    if let DistributionPolicy::Odds(odds) = policy {
        output::field("Odds", odds);
    }

    output::section("Parser");
    output::field("Venue words", config.parser.venue_keywords.join(", "));
    output::field("Code words", config.parser.code_keywords.join(", "));
    output::field("History", config.history.capacity);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}
