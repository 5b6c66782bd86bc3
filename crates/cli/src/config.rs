//! Command-line and environment configuration

use clap::Parser;
use proofmark_core::{AlignConfig, PolicyKind, ReplacementMode};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "proofmark", about = "Proofread text and review the edits as a diff", version)]
pub struct Cli {
    /// Editing policy: flag-only, fix or polish
    #[arg(short, long, default_value = "polish")]
    pub policy: PolicyKind,

    /// Text to proofread
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// File with the text to proofread ("-" reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Image to extract the text from (falls back to --text/--input on failure)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Use this file as the revision instead of calling the generation service
    #[arg(long)]
    pub revised: Option<PathBuf>,

    /// Write a standalone HTML page of the display rendering
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Write an RTF document of the document rendering
    #[arg(long)]
    pub rtf: Option<PathBuf>,

    /// Write the document runs as JSON
    #[arg(long)]
    pub runs_json: Option<PathBuf>,

    /// Title of exported documents
    #[arg(long, default_value = "校对结果")]
    pub title: String,

    /// Report substitutions as a deletion followed by an insertion
    #[arg(long)]
    pub split_replacements: bool,

    #[command(flatten)]
    pub generation: GenerationSettings,

    #[command(flatten)]
    pub ocr: OcrSettings,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn align_config(&self) -> AlignConfig {
        let mode = if self.split_replacements {
            ReplacementMode::Split
        } else {
            ReplacementMode::Merge
        };
        AlignConfig::new().with_replacements(mode)
    }
}

/// Settings of the OpenAI-compatible generation endpoint
#[derive(clap::Args, Debug, Clone)]
pub struct GenerationSettings {
    /// Base URL of the chat completions API
    #[arg(long, env = "PROOFMARK_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// API key sent as a bearer token
    #[arg(long, env = "PROOFMARK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, env = "PROOFMARK_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "PROOFMARK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl GenerationSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Settings of the Tesseract OCR binary
#[derive(clap::Args, Debug, Clone)]
pub struct OcrSettings {
    /// Tesseract language codes joined by '+'
    #[arg(long, env = "PROOFMARK_OCR_LANG", default_value = "chi_sim+eng")]
    pub ocr_lang: String,

    /// Path of the tesseract executable
    #[arg(long, env = "PROOFMARK_TESSERACT", default_value = "tesseract")]
    pub tesseract: PathBuf,
}

impl OcrSettings {
    pub fn language_hints(&self) -> Vec<String> {
        self.ocr_lang
            .split('+')
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["proofmark", "--text", "你好"]).unwrap();
        assert_eq!(cli.policy, PolicyKind::Polish);
        assert_eq!(cli.title, "校对结果");
        assert_eq!(cli.align_config(), AlignConfig::default());
        assert_eq!(cli.ocr.language_hints(), vec!["chi_sim", "eng"]);
    }

    #[test]
    fn test_policy_aliases() {
        let cli = Cli::try_parse_from(["proofmark", "-p", "strict", "-t", "x"]).unwrap();
        assert_eq!(cli.policy, PolicyKind::FlagOnly);

        let cli = Cli::try_parse_from(["proofmark", "--policy", "纠错", "-t", "x"]).unwrap();
        assert_eq!(cli.policy, PolicyKind::Fix);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Cli::try_parse_from(["proofmark", "--policy", "rewrite"]).is_err());
    }

    #[test]
    fn test_text_conflicts_with_input() {
        assert!(Cli::try_parse_from(["proofmark", "-t", "x", "-i", "file.txt"]).is_err());
    }

    #[test]
    fn test_split_replacements() {
        let cli = Cli::try_parse_from(["proofmark", "-t", "x", "--split-replacements"]).unwrap();
        assert_eq!(cli.align_config().replacements, ReplacementMode::Split);
    }

    #[test]
    fn test_timeout() {
        let cli = Cli::try_parse_from(["proofmark", "-t", "x", "--timeout-secs", "30"]).unwrap();
        assert_eq!(cli.generation.timeout(), Some(Duration::from_secs(30)));
    }
}
