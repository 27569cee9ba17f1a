//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "RUNGUARD";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Expected check count from RUNGUARD_EXPECT
    pub expect: Option<u64>,
    /// Run timeout from RUNGUARD_TIMEOUT
    pub timeout: Option<u64>,
    /// Tick interval from RUNGUARD_TICK_MS
    pub tick_ms: Option<u64>,
    /// Output format from RUNGUARD_FORMAT
    pub format: Option<String>,
    /// Debug logging from RUNGUARD_DEBUG
    pub debug: Option<bool>,
    /// Trace logging from RUNGUARD_TRACE
    pub trace: Option<bool>,
    /// Config file from RUNGUARD_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            expect: get_env_parse("EXPECT"),
            timeout: get_env_parse("TIMEOUT"),
            tick_ms: get_env_parse("TICK_MS"),
            format: get_env("FORMAT"),
            debug: get_env_bool("DEBUG"),
            trace: get_env_bool("TRACE"),
            config_file: get_env("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.expect.is_some()
            || self.timeout.is_some()
            || self.tick_ms.is_some()
            || self.format.is_some()
            || self.debug.is_some()
            || self.trace.is_some()
            || self.config_file.is_some()
    }

    /// Get timeout with fallback
    pub fn timeout_or(&self, default: u64) -> u64 {
        self.timeout.unwrap_or(default)
    }

    /// Get tick interval with fallback
    pub fn tick_ms_or(&self, default: u64) -> u64 {
        self.tick_ms.unwrap_or(default)
    }

    /// Get format with fallback
    pub fn format_or(&self, default: &str) -> String {
        self.format.clone().unwrap_or_else(|| default.to_string())
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_EXPECT:   {:?}", ENV_PREFIX, self.expect);
        println!("  {}_TIMEOUT:  {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_TICK_MS:  {:?}", ENV_PREFIX, self.tick_ms);
        println!("  {}_FORMAT:   {:?}", ENV_PREFIX, self.format);
        println!("  {}_DEBUG:    {:?}", ENV_PREFIX, self.debug);
        println!("  {}_TRACE:    {:?}", ENV_PREFIX, self.trace);
        println!("  {}_CONFIG:   {:?}", ENV_PREFIX, self.config_file);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set expected check count
    pub fn expect(mut self, expect: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_EXPECT"), expect.to_string()));
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TIMEOUT"), timeout.to_string()));
        self
    }

    /// Set tick interval
    pub fn tick_ms(mut self, tick_ms: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TICK_MS"), tick_ms.to_string()));
        self
    }

    /// Set output format
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_FORMAT"), format.into()));
        self
    }

    /// Set debug logging
    pub fn debug(mut self, debug: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_DEBUG"), debug.to_string()));
        self
    }

    /// Set trace logging
    pub fn trace(mut self, trace: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TRACE"), trace.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all RUNGUARD environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_EXPECT    Expected check count");
    println!("  {ENV_PREFIX}_TIMEOUT   Run timeout in seconds");
    println!("  {ENV_PREFIX}_TICK_MS   Watchdog tick interval in milliseconds");
    println!("  {ENV_PREFIX}_FORMAT    Output format (text, json, json-pretty)");
    println!("  {ENV_PREFIX}_DEBUG     Enable debug logging (true/false)");
    println!("  {ENV_PREFIX}_TRACE     Enable trace logging (true/false)");
    println!("  {ENV_PREFIX}_CONFIG    Path to configuration file");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_TIMEOUT=30");
    println!("  runguard run --expect 3 --script ok,ok,ok");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.expect.is_none());
        assert!(config.timeout.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_config_fallback() {
        let config = EnvConfig::default();
        assert_eq!(config.timeout_or(5), 5);
        assert_eq!(config.tick_ms_or(1000), 1000);
        assert_eq!(config.format_or("text"), "text");
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .expect(7)
            .timeout(60)
            .format("json")
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.expect, Some(7));
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.format, Some("json".to_string()));
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = EnvBuilder::new().trace(true).apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.trace, Some(true));
    }

    #[test]
    fn test_has_any() {
        let with_timeout = EnvConfig {
            timeout: Some(10),
            ..Default::default()
        };
        assert!(with_timeout.has_any());
    }
}
