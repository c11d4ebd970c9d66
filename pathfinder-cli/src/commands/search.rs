//! Search command - one-shot place suggestions from the configured provider.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use console::style;

use pathfinder::search::{PlaceSearchProvider, SearchError};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the search command.
pub struct SearchArgs {
    pub text: String,
    /// 1-based index of the suggestion to resolve.
    pub resolve: Option<usize>,
}

/// Run the search command.
pub fn run(config_path: Option<&Path>, args: SearchArgs) -> Result<(), CliError> {
    if args.text.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "Search text must not be empty".to_string(),
        ));
    }

    let runner = CliRunner::new(config_path)?;
    runner.log_startup("search");
    let config = runner.config();
    let timeout = Duration::from_secs(config.search.timeout_secs);
    let max_results = config.search.max_results;

    let provider = runner.search_provider()?;
    let runtime = runner.runtime()?;

    runtime.block_on(async move {
        println!(
            "Searching {} for \"{}\"...",
            style(provider.name()).bold(),
            args.text
        );

        let mut suggestions = with_timeout(timeout, provider.complete(args.text.clone())).await?;
        suggestions.truncate(max_results);

        if suggestions.is_empty() {
            println!("No places found.");
            return Ok(());
        }

        println!();
        for (idx, suggestion) in suggestions.iter().enumerate() {
            println!("  {:>2}. {}", idx + 1, style(&suggestion.title).bold());
            if let Some(subtitle) = &suggestion.subtitle {
                println!("      {}", style(subtitle).dim());
            }
        }

        let Some(n) = args.resolve else {
            return Ok(());
        };
        let suggestion = n
            .checked_sub(1)
            .and_then(|idx| suggestions.get(idx))
            .cloned()
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "--resolve {} is out of range (1-{})",
                    n,
                    suggestions.len()
                ))
            })?;

        let destination = with_timeout(timeout, provider.resolve(suggestion)).await?;
        println!();
        println!(
            "Resolved {} to {}",
            style(&destination.title).bold(),
            destination.coordinate
        );
        Ok(())
    })
}

/// Apply the configured provider timeout to a one-shot call.
async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, SearchError>>,
) -> Result<T, CliError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(CliError::from),
        Err(_) => Err(CliError::Search(SearchError::Timeout(
            timeout.as_millis() as u64
        ))),
    }
}
