//! Process-start wiring.
//!
//! Every registry (domain event bus, integration bus, query bus) is
//! populated here by explicit registration calls; nothing is discovered by
//! scanning. Registration order is dispatch order.

use std::sync::Arc;

use verdant_core::bus::{EventBus, InProcessEventBus};
use verdant_core::clock::{Clock, SystemClock};
use verdant_core::integration::{IntegrationEventBus, IntegrationEventPublisher};
use verdant_core::query::QueryBus;
use verdant_core::repository::{ReadRepository, WriteRepository};
use verdant_store::{InMemoryReadStore, InMemoryWriteStore};

use verdant_growing_units::application::projections::GrowingUnitProjector;
use verdant_growing_units::application::view_models::GrowingUnitView;
use verdant_growing_units::domain::aggregates::GrowingUnit;
use verdant_locations::application::projections::LocationProjector;
use verdant_locations::application::query_handlers::LocationByIdHandler;
use verdant_locations::application::view_models::LocationView;
use verdant_locations::domain::aggregates::Location;
use verdant_overview::projections::OverviewProjector;
use verdant_overview::service::OverviewService;
use verdant_overview::view_models::OverviewSnapshot;
use verdant_plants::application::projections::PlantProjector;
use verdant_plants::application::query_handlers::PlantSummariesHandler;
use verdant_plants::application::view_models::PlantView;
use verdant_plants::domain::aggregates::Plant;

use crate::config::AppConfig;

/// The wired application: every repository, bus, and service a caller needs
/// to drive commands end to end.
pub struct App {
    /// Clock injected into every command handler.
    pub clock: Arc<dyn Clock>,
    /// Location write store.
    pub locations: Arc<dyn WriteRepository<Location>>,
    /// Growing-unit write store.
    pub growing_units: Arc<dyn WriteRepository<GrowingUnit>>,
    /// Plant write store.
    pub plants: Arc<dyn WriteRepository<Plant>>,
    /// Location view collection.
    pub location_views: Arc<dyn ReadRepository<LocationView>>,
    /// Growing-unit view collection.
    pub growing_unit_views: Arc<dyn ReadRepository<GrowingUnitView>>,
    /// Plant view collection.
    pub plant_views: Arc<dyn ReadRepository<PlantView>>,
    /// Overview snapshot collection.
    pub overview_snapshots: Arc<dyn ReadRepository<OverviewSnapshot>>,
    /// Cross-context query bus.
    pub query_bus: Arc<QueryBus>,
    /// Domain event bus with all primary projections registered.
    pub event_bus: Arc<dyn EventBus>,
    /// Integration publisher with the overview recompute registered.
    pub integration_publisher: Arc<dyn IntegrationEventPublisher>,
    /// The overview aggregation service.
    pub overview: Arc<OverviewService>,
}

/// Builds the fully wired application.
#[must_use]
pub fn bootstrap(config: &AppConfig) -> App {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Write stores.
    let locations: Arc<dyn WriteRepository<Location>> =
        Arc::new(InMemoryWriteStore::<Location>::new());
    let growing_units: Arc<dyn WriteRepository<GrowingUnit>> =
        Arc::new(InMemoryWriteStore::<GrowingUnit>::new());
    let plants: Arc<dyn WriteRepository<Plant>> = Arc::new(InMemoryWriteStore::<Plant>::new());

    // Read stores.
    let location_views: Arc<dyn ReadRepository<LocationView>> =
        Arc::new(InMemoryReadStore::<LocationView>::new());
    let growing_unit_views: Arc<dyn ReadRepository<GrowingUnitView>> =
        Arc::new(InMemoryReadStore::<GrowingUnitView>::new());
    let plant_views: Arc<dyn ReadRepository<PlantView>> =
        Arc::new(InMemoryReadStore::<PlantView>::new());
    let overview_snapshots: Arc<dyn ReadRepository<OverviewSnapshot>> =
        Arc::new(InMemoryReadStore::<OverviewSnapshot>::new());

    // Cross-context queries: registered before the projectors that pull
    // through them.
    let mut query_bus = QueryBus::new();
    query_bus.register(Arc::new(LocationByIdHandler::new(Arc::clone(
        &location_views,
    ))));
    query_bus.register(Arc::new(PlantSummariesHandler::new(Arc::clone(
        &plant_views,
    ))));
    let query_bus = Arc::new(query_bus);

    // Primary projections on the domain bus, in dispatch order.
    let mut event_bus = InProcessEventBus::new();
    event_bus.register(Arc::new(LocationProjector::new(Arc::clone(
        &location_views,
    ))));
    event_bus.register(Arc::new(PlantProjector::new(Arc::clone(&plant_views))));
    event_bus.register(Arc::new(GrowingUnitProjector::new(
        Arc::clone(&growing_unit_views),
        Arc::clone(&query_bus),
    )));
    let event_bus: Arc<dyn EventBus> = Arc::new(event_bus);

    // Best-effort consumers on the integration bus.
    let overview = Arc::new(OverviewService::new(
        Arc::clone(&growing_unit_views),
        Arc::clone(&overview_snapshots),
        Arc::clone(&clock),
        config.overview_batch_size,
    ));
    let mut integration_bus = IntegrationEventBus::new();
    integration_bus.register(Arc::new(OverviewProjector::new(Arc::clone(&overview))));
    let integration_publisher: Arc<dyn IntegrationEventPublisher> = Arc::new(integration_bus);

    App {
        clock,
        locations,
        growing_units,
        plants,
        location_views,
        growing_unit_views,
        plant_views,
        overview_snapshots,
        query_bus,
        event_bus,
        integration_publisher,
        overview,
    }
}
