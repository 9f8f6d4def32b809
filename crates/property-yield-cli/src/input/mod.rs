pub mod file;
pub mod stdin;

use property_yield_core::PolicyConfig;
use serde_json::Value;

/// Read the JSON document for a command: `--input <file>` first, then piped stdin.
pub fn read_document(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(Some(file::read_json_value(p)?)),
        None => stdin::read_stdin(),
    }
}

/// Effective policy: the `--policy` file when given (validated), otherwise the defaults.
pub fn load_policy(path: Option<&str>) -> Result<PolicyConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PolicyConfig::default());
    };
    let policy = file::read_policy(path)?;
    policy.validate()?;
    log::info!("loaded policy from {path}");
    Ok(policy)
}
