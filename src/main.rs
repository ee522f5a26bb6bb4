// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Fetch the content behind the GitHub URL
// 3. Work out which API key to use and ask Gemini for a summary
// 4. Print it and exit with a proper code:
//    0 = success, 1 = API key missing or rejected, 2 = any other error
//
// Status lines go to stderr so stdout only carries the summary (or JSON).
//
// Rust concepts used:
// - async/await: both API calls are network I/O
// - let-else: bail out early when no API key can be found
// - match guards: `Err(e) if e.is_credential_problem()`
// =============================================================================

mod cli;
mod credential;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use credential::{KeyStore, SaveOutcome};
use gh_digest::{Error, FetchedContent, GeminiClient, GithubClient, ResourceKind, Summarizer};

// The #[tokio::main] attribute creates a tokio runtime and runs our
// async main inside it
#[tokio::main]
async fn main() {
    init_tracing();

    // Run the application and turn the outcome into an exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error: print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr, filtered by RUST_LOG (default: warnings only)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = summary printed
//   Ok(1) = API key missing or rejected
//   Err   = anything else (main turns it into exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();
    let config = cli.config();

    // Fetch first: a bad URL should fail before we worry about API keys
    eprintln!("🔍 Fetching {}", cli.url);
    let github = GithubClient::with_base_url(&config.github_api_base)?;
    let content = github.get_content(&cli.url).await?;
    eprintln!(
        "📄 {} ({} characters)",
        content.display_name,
        content.text.chars().count()
    );

    if cli.content_only {
        print_report(&content, None, cli.json)?;
        return Ok(0);
    }

    // An explicit --key-file always works; the default location needs a
    // home directory, so it may be unavailable
    let store = match &cli.key_file {
        Some(path) => Some(KeyStore::at(path)),
        None => KeyStore::default_location()
            .map_err(|e| tracing::warn!("no key store available: {e:#}"))
            .ok(),
    };

    // Flag/env key first, stored key second (blank flags are ignored)
    let Some(api_key) = credential::resolve_key(cli.api_key.as_deref(), store.as_ref())? else {
        eprintln!("❌ {}", Error::MissingCredential);
        eprintln!("   Pass --api-key or set GEMINI_API_KEY (add --save-key to remember it).");
        return Ok(1);
    };

    let mut just_saved = false;
    if cli.save_key {
        match credential::remember(&api_key, store.as_ref())? {
            SaveOutcome::Saved(path) => {
                just_saved = true;
                eprintln!("🔑 API key saved to {}", path.display());
            }
            SaveOutcome::NoStore => {
                eprintln!("⚠️  API key not saved: no config directory found, pass --key-file to choose a location");
            }
            SaveOutcome::AlreadyStored => {}
        }
    }

    // Ask Gemini for the summary
    eprintln!("🤖 Summarizing with {}...\n", config.model);
    let gemini = GeminiClient::from_config(&config)?;
    let result = gemini
        .summarize(&content.text, content.kind, &content.display_name, &api_key.key)
        .await;

    match result {
        Ok(summary) => {
            print_report(&content, Some(summary.as_str()), cli.json)?;
            Ok(0)
        }
        Err(e) if e.is_credential_problem() => {
            eprintln!("❌ {}", e);
            // Forget the stored key only if it is the one that was rejected
            if credential::discard_if_rejected(&e, &api_key, just_saved, store.as_ref())? {
                eprintln!("   The stored API key has been removed.");
            }
            Ok(1)
        }
        // Everything else is an unexpected error (exit code 2)
        Err(e) => Err(e.into()),
    }
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

// Prints either the summary or, with --content-only, the fetched text
fn print_report(content: &FetchedContent, summary: Option<&str>, json: bool) -> Result<()> {
    if json {
        // Only one of summary / content is filled in, the other is skipped
        let report = Report {
            name: &content.display_name,
            kind: content.kind,
            summary,
            content: summary.is_none().then_some(content.text.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match summary {
            Some(summary) => {
                println!("📝 Summary of {}\n", content.display_name);
                println!("{}", summary.trim_end());
            }
            None => println!("{}", content.text),
        }
    }
    Ok(())
}
