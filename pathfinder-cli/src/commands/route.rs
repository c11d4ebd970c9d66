//! Route command - one-shot driving route between two coordinates.

use std::path::Path;
use std::time::Duration;

use console::style;

use pathfinder::geo::Coordinate;
use pathfinder::route::RouteError;

use crate::error::CliError;
use crate::render::route_summary;
use crate::runner::CliRunner;

/// Arguments for the route command.
pub struct RouteArgs {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// Run the route command.
pub fn run(config_path: Option<&Path>, args: RouteArgs) -> Result<(), CliError> {
    for (flag, coordinate) in [("--from", &args.from), ("--to", &args.to)] {
        if !coordinate.is_valid() {
            return Err(CliError::InvalidArgument(format!(
                "{} {} is not a valid coordinate",
                flag, coordinate
            )));
        }
    }

    let runner = CliRunner::new(config_path)?;
    runner.log_startup("route");
    let timeout = Duration::from_secs(runner.config().route.timeout_secs);

    let provider = runner.route_provider()?;
    let runtime = runner.runtime()?;

    println!("Routing with {}:", style(provider.name()).bold());
    println!("  From: {}", args.from);
    println!("  To:   {}", args.to);
    println!();

    let route = runtime.block_on(async {
        match tokio::time::timeout(timeout, provider.route(args.from, args.to)).await {
            Ok(result) => result,
            Err(_) => Err(RouteError::Timeout(timeout.as_millis() as u64)),
        }
    })?;

    println!("{} {}", style("Route:").green().bold(), route_summary(&route));
    println!(
        "  Straight-line distance: {:.2} km",
        args.from.distance_m(&args.to) / 1000.0
    );

    Ok(())
}
