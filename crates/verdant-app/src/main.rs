//! Verdant demo runner: wires the pipeline, seeds a small garden, moves a
//! plant, and prints the resulting overview snapshot.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use verdant_core::context::RequestContext;
use verdant_growing_units::application::command_handlers::create_growing_unit;
use verdant_growing_units::domain::aggregates::{Dimensions, UnitKind};
use verdant_growing_units::domain::commands::CreateGrowingUnit;
use verdant_locations::application::command_handlers::create_location;
use verdant_locations::domain::commands::CreateLocation;
use verdant_overview::view_models::OVERVIEW_SNAPSHOT_ID;
use verdant_plants::application::command_handlers::{create_plant, transplant_plant};
use verdant_plants::domain::aggregates::PlantStatus;
use verdant_plants::domain::commands::{CreatePlant, TransplantPlant};

use verdant_app::bootstrap::bootstrap;
use verdant_app::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env()?;
    let app = bootstrap(&config);
    tracing::info!(
        overview_batch = config.overview_batch_size,
        "verdant pipeline wired"
    );

    // Seed a location with two growing units.
    let ctx = RequestContext::new();
    let location_id = create_location(
        &CreateLocation {
            name: "Greenhouse A".into(),
            description: Some("south-facing".into()),
            covered: true,
        },
        &ctx,
        app.clock.as_ref(),
        app.locations.as_ref(),
        app.event_bus.as_ref(),
        app.integration_publisher.as_ref(),
    )
    .await?;

    let mut unit_ids = Vec::new();
    for (name, kind, capacity) in [
        ("Bench 1", UnitKind::Tray, 6),
        ("Bench 2", UnitKind::Bed, 4),
    ] {
        let ctx = RequestContext::new();
        let unit_id = create_growing_unit(
            &CreateGrowingUnit {
                name: name.into(),
                location_id,
                kind,
                capacity,
                dimensions: Dimensions::new(120.0, 60.0, 25.0)?,
            },
            &ctx,
            app.clock.as_ref(),
            app.growing_units.as_ref(),
            app.query_bus.as_ref(),
            app.event_bus.as_ref(),
            app.integration_publisher.as_ref(),
        )
        .await?;
        unit_ids.push(unit_id);
    }

    // Plant a few herbs in the first unit.
    let mut plant_ids = Vec::new();
    for (name, species) in [
        ("basil", "Ocimum basilicum"),
        ("mint", "Mentha spicata"),
        ("thyme", "Thymus vulgaris"),
    ] {
        let ctx = RequestContext::new();
        let plant_id = create_plant(
            &CreatePlant {
                name: name.into(),
                species: species.into(),
                status: PlantStatus::Seedling,
                growing_unit_id: unit_ids[0],
                notes: None,
            },
            &ctx,
            app.clock.as_ref(),
            app.plants.as_ref(),
            app.growing_units.as_ref(),
            app.event_bus.as_ref(),
            app.integration_publisher.as_ref(),
        )
        .await?;
        plant_ids.push(plant_id);
    }

    // Move the basil to the second bench.
    let ctx = RequestContext::new();
    transplant_plant(
        &TransplantPlant {
            plant_id: plant_ids[0],
            target_unit_id: unit_ids[1],
        },
        &ctx,
        app.clock.as_ref(),
        app.plants.as_ref(),
        app.growing_units.as_ref(),
        app.event_bus.as_ref(),
        app.integration_publisher.as_ref(),
    )
    .await?;

    // The integration pipeline has recomputed the snapshot along the way.
    let ctx = RequestContext::new();
    let snapshot = app
        .overview_snapshots
        .find_by_id(&ctx, OVERVIEW_SNAPSHOT_ID)
        .await?
        .ok_or("overview snapshot missing")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
