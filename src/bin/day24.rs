use hailstorm::crossing::{count_future_crossings, TestArea};
use hailstorm::{io, trajectory};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "with_dhat")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "with_dhat")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

fn main() -> Result<(), Box<dyn std::error::Error + 'static>> {
    #[cfg(feature = "with_dhat")]
    let _dhat = Dhat::start_heap_profiling();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    // the examples use 7..=27, real inputs the default
    let area = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<TestArea>()?,
        None => TestArea::default(),
    };

    let stdin = std::io::stdin();
    let records = io::read_all(stdin.lock())?;
    info!(records = records.len(), ?area, "read hailstones");

    let part_one = count_future_crossings(&records, &area);

    let rock = trajectory::solve_with_retry(&records)?;
    info!(%rock, "found rock");

    for missed in rock.missed(&records) {
        warn!(%missed, "rock never meets this hailstone");
    }

    let part_two = rock.coordinate_sum();

    println!("{}", part_one);
    println!("{}", part_two);

    Ok(())
}
