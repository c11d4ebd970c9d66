//! Simulate command - run the full coordinator against a replayed track.
//!
//! The simulation plays the part of a user: it grants location permission,
//! types the query one character at a time, picks a suggestion and
//! optionally pans the map after a number of fixes. Every view-state change
//! is printed as it happens.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use console::style;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use pathfinder::config::CoordinatorConfig;
use pathfinder::coordinator::{
    CoordinatorHandle, CoordinatorService, OperationStatus, Providers, ViewState,
};
use pathfinder::location::{ReplayConfig, ReplayLocationProvider};

use crate::error::CliError;
use crate::render::{describe_camera, describe_changes, describe_position, print_changes, route_summary};
use crate::runner::CliRunner;

/// Pause between simulated keystrokes.
const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(120);

/// Longest wait for any single step of the script.
const STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Arguments for the simulate command.
pub struct SimulateArgs {
    pub track: PathBuf,
    pub query: String,
    /// 1-based index of the suggestion to pick.
    pub pick: usize,
    /// Pan the map after this many fixes.
    pub pan_after: Option<usize>,
    pub interval_ms: u64,
    pub deny_permission: bool,
}

/// Run the simulate command.
pub fn run(config_path: Option<&Path>, args: SimulateArgs) -> Result<(), CliError> {
    if args.pick == 0 {
        return Err(CliError::InvalidArgument(
            "--pick counts from 1".to_string(),
        ));
    }
    if args.interval_ms == 0 {
        return Err(CliError::InvalidArgument(
            "--interval-ms must be greater than 0".to_string(),
        ));
    }

    let runner = CliRunner::new(config_path)?;
    runner.log_startup("simulate");

    let interval = Duration::from_millis(args.interval_ms);
    let location = ReplayLocationProvider::from_track_file(
        &args.track,
        ReplayConfig {
            interval,
            deny_permission: args.deny_permission,
            stamp_fixes: true,
        },
    )?;
    if location.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "Track file {} contains no fixes",
            args.track.display()
        )));
    }
    let track_duration = interval * location.len() as u32;

    let providers = Providers {
        location: Arc::new(location),
        search: runner.search_provider()?,
        route: runner.route_provider()?,
    };
    let config = CoordinatorConfig::from_config_file(runner.config());

    println!("Pathfinder Simulation v{}", env!("CARGO_PKG_VERSION"));
    println!("=========================");
    println!();
    println!("Track:    {} ({:.1}s)", args.track.display(), track_duration.as_secs_f64());
    println!("Query:    \"{}\" (pick #{})", args.query, args.pick);
    println!("Search:   {}", providers.search.name());
    println!("Routing:  {}", providers.route.name());
    if let Some(n) = args.pan_after {
        println!("Pan:      after {} fixes", n);
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let runtime = runner.runtime()?;
    let final_view = runtime.block_on(simulate(config, providers, &args, track_duration))?;

    print_summary(&final_view);
    Ok(())
}

async fn simulate(
    config: CoordinatorConfig,
    providers: Providers,
    args: &SimulateArgs,
    track_duration: Duration,
) -> Result<ViewState, CliError> {
    let (handle, task) = CoordinatorService::new(config, providers).start();
    let renderer = tokio::spawn(render_loop(handle.subscribe()));

    let interrupted = CancellationToken::new();
    let on_signal = interrupted.clone();
    ctrlc::set_handler(move || {
        println!();
        println!("Received interrupt, stopping simulation...");
        on_signal.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let started = Instant::now();
    let outcome = tokio::select! {
        _ = interrupted.cancelled() => Ok(()),
        result = script(&handle, args) => result,
    };

    // Let the rest of the track play out
    if outcome.is_ok() && !interrupted.is_cancelled() {
        tokio::select! {
            _ = interrupted.cancelled() => {}
            _ = tokio::time::sleep_until(started + track_duration) => {}
        }
    }

    let final_view = handle.view();
    handle.shutdown();
    task.await.map_err(|_| CliError::Stopped)?;
    let _ = renderer.await;

    outcome.map(|_| final_view)
}

/// The simulated user.
async fn script(handle: &CoordinatorHandle, args: &SimulateArgs) -> Result<(), CliError> {
    handle.request_permission()?;

    if let Some(fixes) = args.pan_after {
        tokio::spawn(pan_after(handle.clone(), fixes));
    }

    let mut typed = String::new();
    for ch in args.query.chars() {
        typed.push(ch);
        handle.query_changed(typed.clone())?;
        tokio::time::sleep(KEYSTROKE_INTERVAL).await;
    }

    let query = args.query.clone();
    let Some(view) = step(handle, "suggestions", move |v| {
        v.search_text == query
            && (v.search_status == OperationStatus::Ready || v.search_status.error().is_some())
    })
    .await?
    else {
        return Ok(());
    };

    let Some(chosen) = view.suggestions.get(args.pick - 1).cloned() else {
        warn!(
            available = view.suggestions.len(),
            pick = args.pick,
            "Nothing to pick"
        );
        println!(
            "{} {} suggestion(s), cannot pick #{}",
            style("Note:").yellow(),
            view.suggestions.len(),
            args.pick
        );
        return Ok(());
    };
    info!(title = %chosen.title, "Choosing suggestion");
    handle.choose_suggestion(chosen.clone())?;

    let title = chosen.title.clone();
    let Some(view) = step(handle, "destination", move |v| {
        v.destination.as_ref().is_some_and(|d| d.title == title)
            || v.search_status.error().is_some()
    })
    .await?
    else {
        return Ok(());
    };
    if view.destination.is_none() {
        return Ok(());
    }

    step(handle, "route", |v| {
        v.route.is_some() || v.route_status.error().is_some() || v.location_status.error().is_some()
    })
    .await?;

    Ok(())
}

/// Wait for one script step, giving up after [`STEP_TIMEOUT`].
async fn step(
    handle: &CoordinatorHandle,
    what: &str,
    predicate: impl FnMut(&ViewState) -> bool,
) -> Result<Option<ViewState>, CliError> {
    match tokio::time::timeout(STEP_TIMEOUT, handle.wait_for(predicate)).await {
        Ok(Some(view)) => Ok(Some(view)),
        Ok(None) => Err(CliError::Stopped),
        Err(_) => {
            warn!(step = what, timeout_secs = STEP_TIMEOUT.as_secs(), "Gave up waiting");
            println!("{} gave up waiting for {}", style("Note:").yellow(), what);
            Ok(None)
        }
    }
}

/// Pan the map once `fixes` distinct fixes have been shown.
async fn pan_after(handle: CoordinatorHandle, fixes: usize) {
    let mut rx = handle.subscribe();
    let mut seen = 0;
    let mut last = None;

    while rx.changed().await.is_ok() {
        let position = rx.borrow_and_update().position;
        if position.is_some() && position != last {
            seen += 1;
            last = position;
        }
        if seen >= fixes {
            info!(fixes = seen, "Simulating map pan");
            let _ = handle.map_panned(None);
            return;
        }
    }
}

/// Print every view-state change until the service stops.
async fn render_loop(mut view: watch::Receiver<ViewState>) {
    let started = Instant::now();
    let mut prev = ViewState::default();

    while view.changed().await.is_ok() {
        let next = view.borrow_and_update().clone();
        let changes = describe_changes(&prev, &next);
        if !changes.is_empty() {
            println!(
                "{}",
                style(format!("[{:>6.2}s]", started.elapsed().as_secs_f64())).dim()
            );
            print_changes(&changes);
        }
        prev = next;
    }
}

fn print_summary(view: &ViewState) {
    println!();
    println!("Simulation Summary");
    println!("──────────────────");
    match &view.position {
        Some(position) => println!("  Position:    {}", describe_position(position)),
        None => println!("  Position:    (none)"),
    }
    println!("  Camera:      {}", describe_camera(&view.camera));
    match &view.destination {
        Some(destination) => println!("  Destination: {}", destination.title),
        None => println!("  Destination: (none)"),
    }
    match &view.route {
        Some(route) => println!("  Route:       {}", route_summary(route)),
        None => println!("  Route:       (none)"),
    }
    for error in view.errors() {
        println!("  {} {}", style("Error:").red(), error);
    }
}
