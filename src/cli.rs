// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single action (summarize one URL), so instead of subcommands
// the URL is a positional argument and everything else is a flag. Most flags
// can also come from environment variables thanks to clap's `env` feature.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use gh_digest::config::{Config, DEFAULT_GEMINI_API, DEFAULT_GITHUB_API, DEFAULT_MODEL};

#[derive(Parser, Debug)]
#[command(
    name = "gh-digest",
    version,
    about = "Summarize a GitHub repository, file, issue or pull request with Gemini",
    long_about = "gh-digest fetches the content behind a GitHub URL (README and open issues for a \
                  repository, the file itself, or an issue/PR thread with its comments) and asks \
                  Gemini for a short, developer-oriented summary."
)]
pub struct Cli {
    /// GitHub URL, e.g. https://github.com/user/repo/issues/42
    pub url: String,

    /// Gemini API key
    ///
    /// Falls back to the key stored with --save-key when not given.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Remember the given --api-key for later runs
    #[arg(long, requires = "api_key")]
    pub save_key: bool,

    /// Where the remembered key is kept (default: <config dir>/gh-digest/api_key)
    #[arg(long, env = "GH_DIGEST_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Output JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Only fetch and print the GitHub content, don't call the LLM
    #[arg(long)]
    pub content_only: bool,

    /// Gemini model to use
    #[arg(long, env = "GH_DIGEST_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// GitHub REST API root
    #[arg(long, env = "GH_DIGEST_GITHUB_API", default_value = DEFAULT_GITHUB_API)]
    pub github_api: String,

    /// Gemini REST API root
    #[arg(long, env = "GH_DIGEST_GEMINI_API", default_value = DEFAULT_GEMINI_API)]
    pub gemini_api: String,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            github_api_base: self.github_api.clone(),
            gemini_api_base: self.gemini_api.clone(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gh-digest", "https://github.com/o/r"]).unwrap();
        assert_eq!(cli.url, "https://github.com/o/r");
        assert!(!cli.json);
        assert!(!cli.content_only);
        assert_eq!(cli.config().github_api_base, DEFAULT_GITHUB_API);
    }

    #[test]
    fn test_save_key_needs_api_key() {
        use clap::CommandFactory;

        // Drop the GEMINI_API_KEY fallback so the result doesn't depend on
        // the environment the tests run in
        let command = Cli::command().mut_arg("api_key", |arg| arg.env(None::<&str>));
        let result = command.try_get_matches_from(["gh-digest", "https://github.com/o/r", "--save-key"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_save_key_with_api_key() {
        let cli = Cli::try_parse_from([
            "gh-digest",
            "https://github.com/o/r",
            "--api-key",
            "k",
            "--save-key",
        ])
        .unwrap();
        assert!(cli.save_key);
        assert_eq!(cli.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "gh-digest",
            "https://github.com/o/r",
            "--model",
            "gemini-2.5-pro",
            "--github-api",
            "http://localhost:9000",
            "--json",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.github_api_base, "http://localhost:9000");
        assert!(cli.json);
    }
}
