// Rust Planner
// Command-line entry point: prints layouts for a snapshot and sends mutations

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use rust_planner::models::entity::Entity;
use rust_planner::models::layout::GridWindow;
use rust_planner::models::settings::Settings;
use rust_planner::models::ui::ViewType;
use rust_planner::services::layout::{DayLayoutEngine, MonthSpanEngine, WeekLayoutEngine};
use rust_planner::services::mutation::{
    toggle_completion, HttpMutationSink, MutationCommand, MutationDispatcher,
};
use rust_planner::services::reschedule::DragRescheduler;
use rust_planner::services::settings::SettingsService;
use rust_planner::services::snapshot::load_snapshot;
use rust_planner::utils::date::today_in;

const USAGE: &str = "usage:
  rust-planner <snapshot.json> [day|week|month] [YYYY-MM-DD]
  rust-planner <snapshot.json> move <entity-id> <YYYY-MM-DD>
  rust-planner <snapshot.json> toggle <entity-id>";

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Planner");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(snapshot_path) = args.first().map(PathBuf::from) else {
        bail!("{}", USAGE);
    };

    let settings = SettingsService::from_environment().get()?;
    let tz = settings.time_zone().map_err(|e| anyhow!(e))?;
    let collection = load_snapshot(&snapshot_path, tz)?;
    let entities = collection.entities;

    match args.get(1).map(String::as_str) {
        Some("move") => {
            let entity = find_entity(&entities, args.get(2))?;
            let target = args.get(3).map(|value| parse_date(value)).transpose()?;
            let command = DragRescheduler::on_drop(entity, target)?.into_command();
            send(&settings, command)
        }
        Some("toggle") => {
            let entity = find_entity(&entities, args.get(2))?;
            send(&settings, toggle_completion(entity))
        }
        view => {
            let view = match view {
                Some(value) => value.parse::<ViewType>().map_err(|e| anyhow!(e))?,
                None => ViewType::default(),
            };
            let date = match args.get(2) {
                Some(value) => parse_date(value)?,
                None => today_in(tz),
            };
            print_layout(&entities, view, date, &settings)
        }
    }
}

fn print_layout(
    entities: &[Entity],
    view: ViewType,
    date: NaiveDate,
    settings: &Settings,
) -> Result<()> {
    let json = match view {
        ViewType::Day => {
            let layout = DayLayoutEngine::layout(entities, date, &settings.day_config());
            serde_json::to_string_pretty(&layout)?
        }
        ViewType::Week => {
            let layout = WeekLayoutEngine::layout_for_date(
                entities,
                date,
                settings.first_day_of_week,
                &settings.week_slots(),
                settings.visible_cap,
            );
            serde_json::to_string_pretty(&layout)?
        }
        ViewType::Month => {
            let window = GridWindow::containing(date, settings.first_day_of_week)
                .ok_or_else(|| anyhow!("No month grid for {}", date))?;
            let layout = MonthSpanEngine::layout(entities, &window, settings.visible_cap);
            serde_json::to_string_pretty(&layout)?
        }
    };

    println!("{}", json);
    Ok(())
}

/// Dispatch when an endpoint is configured, otherwise print the command.
fn send(settings: &Settings, command: MutationCommand) -> Result<()> {
    if settings.mutation_endpoint.is_none() {
        log::info!("No mutation endpoint configured; printing command only");
        println!("{}", serde_json::to_string_pretty(&command)?);
        return Ok(());
    }

    let sink = Arc::new(HttpMutationSink::from_settings(settings)?);
    let timeout = Duration::from_secs(settings.mutation_timeout_secs);
    let dispatcher = MutationDispatcher::new(sink, timeout);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let report = runtime.block_on(dispatcher.dispatch(command));
    match report.outcome {
        Ok(()) => {
            println!("{}", report.command.describe());
            Ok(())
        }
        Err(err) => Err(anyhow!(err).context(report.command.describe())),
    }
}

fn find_entity<'a>(entities: &'a [Entity], id: Option<&String>) -> Result<&'a Entity> {
    let id = id.ok_or_else(|| anyhow!("{}", USAGE))?;
    entities
        .iter()
        .find(|entity| &entity.id == id)
        .ok_or_else(|| anyhow!("No entity with id {}", id))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date {:?}", value))
}
