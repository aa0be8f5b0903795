//! CLI argument value parsers
//!
//! Checks clap cannot express on its own. Each returns the parsed value or a
//! message clap prints next to the offending argument.

use std::path::PathBuf;

/// Port between 1 and 65535
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Existing, readable regular file
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!(
            "Configuration file does not exist or is not a file: '{}'",
            path_str
        ));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Between 1 and 100 steps
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        101.. => Err("Rollback steps cannot exceed 100".to_string()),
        _ => Ok(steps),
    }
}

/// Non-empty host without spaces; dotted-decimal hosts must be valid IPv4
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    let looks_like_ipv4 = host.chars().all(|c| c.is_ascii_digit() || c == '.');
    if looks_like_ipv4 && host.parse::<std::net::Ipv4Addr>().is_err() {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }

    Ok(host.to_string())
}
