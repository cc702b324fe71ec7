//! The overview aggregation service.

use std::sync::Arc;

use futures::future::try_join_all;

use verdant_core::clock::Clock;
use verdant_core::context::RequestContext;
use verdant_core::criteria::{Criteria, Pagination, Sort};
use verdant_core::error::DomainError;
use verdant_core::repository::ReadRepository;

use verdant_growing_units::application::view_models::{GrowingUnitView, PlantSummary};

use crate::stats;
use crate::view_models::{OVERVIEW_SNAPSHOT_ID, OverviewSnapshot};

/// Recomputes the garden-wide statistics snapshot from the full
/// growing-unit read model.
///
/// The fetch is a fan-out/fan-in over independent read-only page queries:
/// page 1 reveals `total_pages`, the remaining pages run in parallel, and
/// results concatenate in page order regardless of arrival order. No shared
/// mutable state is involved, so no locking is needed.
pub struct OverviewService {
    units: Arc<dyn ReadRepository<GrowingUnitView>>,
    snapshots: Arc<dyn ReadRepository<OverviewSnapshot>>,
    clock: Arc<dyn Clock>,
    batch_size: u32,
}

impl OverviewService {
    /// Creates a service reading units in `batch_size` pages.
    #[must_use]
    pub fn new(
        units: Arc<dyn ReadRepository<GrowingUnitView>>,
        snapshots: Arc<dyn ReadRepository<OverviewSnapshot>>,
        clock: Arc<dyn Clock>,
        batch_size: u32,
    ) -> Self {
        Self {
            units,
            snapshots,
            clock,
            batch_size: batch_size.max(1),
        }
    }

    fn page_criteria(&self, page: u32) -> Criteria {
        // A stable sort keeps page boundaries consistent across the fan-out.
        Criteria::unfiltered()
            .with_sort(Sort::ascending("name"))
            .with_pagination(Pagination::new(page, self.batch_size))
    }

    /// Fetches every growing-unit view: page 1 first, the rest in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first page query failure.
    pub async fn fetch_all_units(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<GrowingUnitView>, DomainError> {
        let first = self.units.find_by_criteria(ctx, &self.page_criteria(1)).await?;
        let total_pages = first.total_pages();

        let mut units = first.items;
        if total_pages <= 1 {
            return Ok(units);
        }

        let remaining = (2..=total_pages).map(|page| {
            let criteria = self.page_criteria(page);
            async move { self.units.find_by_criteria(ctx, &criteria).await }
        });
        // try_join_all resolves in input order, so concatenation is in page
        // order no matter which page arrives first.
        for page in try_join_all(remaining).await? {
            units.extend(page.items);
        }

        Ok(units)
    }

    /// Recomputes the snapshot and upserts it under the singleton id.
    ///
    /// O(total units) per call; there is no incremental path. A failure
    /// leaves the previous snapshot in place.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or store failure.
    pub async fn recompute(&self, ctx: &RequestContext) -> Result<OverviewSnapshot, DomainError> {
        let units = self.fetch_all_units(ctx).await?;
        let plants: Vec<PlantSummary> = units.iter().flat_map(|u| u.plants.clone()).collect();

        let total_capacity = stats::total_capacity(&units);
        let occupied_slots = stats::occupied_slots(&units);
        let snapshot = OverviewSnapshot {
            id: OVERVIEW_SNAPSHOT_ID,
            total_plants: plants.len() as u64,
            plants_by_status: stats::plants_by_status(&plants),
            plants_by_species: stats::plants_by_species(&plants),
            total_units: units.len() as u64,
            units_by_kind: stats::units_by_kind(&units),
            total_capacity,
            occupied_slots,
            occupancy_rate: stats::occupancy_rate(total_capacity, occupied_slots),
            total_volume_liters: stats::total_volume_liters(&units),
            plants_per_unit: stats::plants_per_unit(&units),
            generated_at: self.clock.now(),
        };

        self.snapshots.save(ctx, &snapshot).await?;

        tracing::debug!(
            total_units = snapshot.total_units,
            total_plants = snapshot.total_plants,
            correlation_id = %ctx.correlation_id,
            "overview snapshot recomputed"
        );
        Ok(snapshot)
    }
}
