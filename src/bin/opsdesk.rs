use std::fmt::Display;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use opsdesk::{
    config::{self, ClientConfig},
    filter::{self, DiscreteFilter, FilterState, Tally},
    inspection::{self, InspectionBadge},
    models::{Employee, Location, Schedule, Task, User, Vehicle},
    HttpTransport, Resource, ResourceKind, ResourceStore, ResourceTransport,
};

/// Runs a generic handler with the record type picked by `kind`.
macro_rules! for_kind {
    ($kind:expr, $handler:ident, $($arg:expr),* $(,)?) => {
        match $kind {
            ResourceKind::Users => $handler::<User>($($arg),*).await?,
            ResourceKind::Employees => $handler::<Employee>($($arg),*).await?,
            ResourceKind::Tasks => $handler::<Task>($($arg),*).await?,
            ResourceKind::Locations => $handler::<Location>($($arg),*).await?,
            ResourceKind::Vehicles => $handler::<Vehicle>($($arg),*).await?,
            ResourceKind::Schedules => $handler::<Schedule>($($arg),*).await?,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize()?;

    match cli.command {
        Commands::List(args) => {
            for_kind!(args.resource, handle_list, &context, &args, cli.json)
        }
        Commands::Stats(args) => {
            for_kind!(args.resource, handle_stats, &context, &args, cli.json)
        }
        Commands::Seed(args) => {
            for_kind!(args.resource, handle_seed, &context, cli.json)
        }
        Commands::Delete(args) => {
            if !args.resource.deletable() {
                bail!(
                    "{} cannot be deleted; set the status to inactive instead",
                    args.resource.collection()
                );
            }
            for_kind!(args.resource, handle_delete, &context, &args.id)
        }
        Commands::Inspections => handle_inspections(&context, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "opsdesk",
    about = "Inspect and manage operations dashboard collections",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection, optionally filtered
    List(ListArgs),
    /// Count records grouped by one field
    Stats(StatsArgs),
    /// Populate an empty collection with the built-in defaults
    Seed(ResourceArgs),
    /// Delete one record
    Delete(DeleteArgs),
    /// Show vehicles whose inspection is overdue or due soon
    Inspections,
}

#[derive(Args)]
struct ResourceArgs {
    #[arg(help = "Collection: users, employees, tasks, locations, vehicles, schedules")]
    resource: ResourceKind,
}

#[derive(Args)]
struct ListArgs {
    #[arg(help = "Collection: users, employees, tasks, locations, vehicles, schedules")]
    resource: ResourceKind,
    #[arg(long, default_value = "", help = "Case-insensitive substring search")]
    search: String,
    #[arg(long = "filter", help = "Exact field match, e.g. status=pending (repeatable)")]
    filters: Vec<DiscreteFilter>,
}

#[derive(Args)]
struct StatsArgs {
    #[arg(help = "Collection: users, employees, tasks, locations, vehicles, schedules")]
    resource: ResourceKind,
    #[arg(long, default_value = "status", help = "Field to group by")]
    by: String,
}

#[derive(Args)]
struct DeleteArgs {
    #[arg(help = "Collection: users, tasks, vehicles, schedules")]
    resource: ResourceKind,
    #[arg(help = "Record id")]
    id: String,
}

struct CliContext {
    config: ClientConfig,
    transport: Arc<dyn ResourceTransport>,
}

impl CliContext {
    fn initialize() -> Result<Self> {
        let config = config::load_config().context("failed to load configuration")?;
        config::init_tracing(&config.log_level, config.log_json);
        let transport = HttpTransport::from_config(&config)
            .map_err(|e| anyhow!("failed to set up HTTP transport: {}", e))?;
        debug!(base_url = %transport.base_url(), "CLI context initialized");
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    fn store<T: Resource>(&self) -> ResourceStore<T> {
        ResourceStore::new(self.transport.clone())
    }
}

async fn handle_list<T: Resource + Display>(
    context: &CliContext,
    args: &ListArgs,
    json: bool,
) -> Result<()> {
    let mut store = context.store::<T>();
    let records = store
        .list()
        .await
        .with_context(|| format!("failed to list {}", T::COLLECTION))?;

    let state = FilterState {
        query: args.search.clone(),
        filters: args.filters.clone(),
    };
    let visible = filter::apply(&records, &state);

    if json {
        print_json(&visible)?;
    } else {
        for record in &visible {
            println!("{}  {}", record.id(), record);
        }
        println!("{} of {} {}", visible.len(), records.len(), T::COLLECTION);
    }
    Ok(())
}

async fn handle_stats<T: Resource>(
    context: &CliContext,
    args: &StatsArgs,
    json: bool,
) -> Result<()> {
    let mut store = context.store::<T>();
    let records = store
        .list()
        .await
        .with_context(|| format!("failed to list {}", T::COLLECTION))?;
    let tally = Tally::by_field(&records, &args.by);

    if json {
        print_json(&tally)?;
    } else if tally.is_empty() {
        println!("No {} values for field '{}'", T::COLLECTION, args.by);
    } else {
        for (value, count) in tally.iter() {
            println!("{:>6}  {}", count, value);
        }
    }
    Ok(())
}

async fn handle_seed<T: Resource>(context: &CliContext, json: bool) -> Result<()> {
    if !context.config.seed_on_empty {
        bail!("seeding is disabled by configuration (seed_on_empty = false)");
    }
    let mut store = context.store::<T>();
    let records = store
        .seed_if_empty(T::defaults())
        .await
        .with_context(|| format!("failed to seed {}", T::COLLECTION))?;

    if json {
        print_json(records.as_slice())?;
    } else {
        println!("{} now holds {} records", T::COLLECTION, records.len());
    }
    Ok(())
}

async fn handle_delete<T: Resource>(context: &CliContext, id: &str) -> Result<()> {
    context
        .store::<T>()
        .delete(id)
        .await
        .with_context(|| format!("failed to delete {} {}", T::COLLECTION, id))?;
    println!("Deleted {} from {}", id, T::COLLECTION);
    Ok(())
}

#[derive(Serialize)]
struct InspectionRow<'a> {
    id: &'a str,
    license_plate: &'a str,
    next_inspection: &'a str,
    badge: InspectionBadge,
}

async fn handle_inspections(context: &CliContext, json: bool) -> Result<()> {
    let mut store = context.store::<Vehicle>();
    let vehicles = store.list().await.context("failed to list vehicles")?;
    let today = Local::now().date_naive();

    let rows: Vec<InspectionRow<'_>> = vehicles
        .iter()
        .filter_map(|v| {
            v.inspection_badge(today).map(|badge| InspectionRow {
                id: &v.id,
                license_plate: &v.license_plate,
                next_inspection: &v.next_inspection,
                badge,
            })
        })
        .collect();

    if json {
        print_json(&rows)?;
    } else if rows.is_empty() {
        println!(
            "No inspections due in the next {} days",
            inspection::DUE_SOON_WINDOW_DAYS
        );
    } else {
        for row in &rows {
            println!(
                "{}  {}  {}  {}",
                row.id, row.license_plate, row.next_inspection, row.badge
            );
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
