//! Output formatters for run verdicts
//!
//! Provides text and JSON output formats.

use crate::models::Verdict;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Verdict formatter
pub struct VerdictFormatter {
    format: OutputFormat,
}

impl VerdictFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format the terminal verdict of a run
    pub fn format_verdict(&self, verdict: &Verdict) -> String {
        match self.format {
            OutputFormat::Text => verdict.to_string(),
            OutputFormat::Json => serde_json::to_string(verdict).unwrap_or_default(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(verdict).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunHandle, RunOutcome};

    fn sample_verdict() -> Verdict {
        let run = RunHandle::new(3, 5);
        run.pass();
        run.pass();
        run.fail();
        Verdict::from_run(&run, RunOutcome::Completed)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_text_format_is_the_summary() {
        let formatter = VerdictFormatter::new(OutputFormat::Text);
        let text = formatter.format_verdict(&sample_verdict());
        assert_eq!(text, "Test result\nOK: 2\nFAIL: 1\nTotal: 3");
    }

    #[test]
    fn test_json_format_parses_back() {
        let formatter = VerdictFormatter::new(OutputFormat::Json);
        let json = formatter.format_verdict(&sample_verdict());

        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ok, 2);
        assert_eq!(back.fail, 1);
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let formatter = VerdictFormatter::new(OutputFormat::JsonPretty);
        let json = formatter.format_verdict(&sample_verdict());
        assert!(json.contains('\n'));
    }
}
