//! Economic enrichment for entities.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{debug, instrument};

use econ_bls::BlsClient;
use econ_core::{Indicator, Result, SeriesId};

use crate::mapping::{EntitySeriesMapping, SeriesMapper, StaticSeriesMapper};

/// Default number of years before the current one to request.
pub const DEFAULT_LOOKBACK_YEARS: i32 = 5;

/// Combines a [`SeriesMapper`] with a [`BlsClient`] to produce indicators for
/// an entity.
///
/// Errors from the client are propagated unchanged; callers decide whether to
/// degrade by omitting enrichment.
#[derive(Debug, Clone)]
pub struct EconomicDataService {
    client: Arc<BlsClient>,
    mapper: Arc<dyn SeriesMapper>,
    lookback_years: i32,
}

impl EconomicDataService {
    /// Create a service over `client` using the built-in occupation table.
    #[must_use]
    pub fn new(client: Arc<BlsClient>) -> Self {
        Self {
            client,
            mapper: Arc::new(StaticSeriesMapper::builtin().clone()),
            lookback_years: DEFAULT_LOOKBACK_YEARS,
        }
    }

    /// Set the mapper used to resolve entities.
    #[must_use]
    pub fn set_mapper(mut self, mapper: Arc<dyn SeriesMapper>) -> Self {
        self.mapper = mapper;
        self
    }

    /// Set how many years before the current one are requested.
    #[must_use]
    pub fn set_lookback_years(mut self, years: i32) -> Self {
        self.lookback_years = years.max(0);
        self
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &Arc<BlsClient> {
        &self.client
    }

    /// Fetches the trailing window of every series configured for `entity_id`.
    ///
    /// Returns an empty list without touching the network when enrichment is
    /// disabled, the entity is unmapped, or its mapping names no series.
    #[instrument(skip(self))]
    pub async fn economic_data_for(&self, entity_id: &str) -> Result<Vec<Indicator>> {
        if !self.client.config(None).enabled {
            debug!("Economic enrichment disabled");
            return Ok(Vec::new());
        }

        let Some(mapping) = self.mapper.mapping_for(entity_id) else {
            debug!("No series mapping for entity");
            return Ok(Vec::new());
        };

        let ids = mapping.series_ids();
        if ids.is_empty() {
            debug!("Series mapping for entity is empty");
            return Ok(Vec::new());
        }

        let end_year = Utc::now().year();
        let start_year = end_year - self.lookback_years;

        let series = self
            .client
            .get_multiple_series(&ids, Some(start_year), Some(end_year), None)
            .await?;

        let generated_at = Utc::now();
        Ok(series
            .into_iter()
            .map(|s| Indicator {
                display_name: display_name(mapping, &s.series_id),
                id: s.series_id,
                data: s.data,
                generated_at,
            })
            .collect())
    }
}

/// Indicator name for `id`: the name of the role it fills, or the raw id.
fn display_name(mapping: &EntitySeriesMapping, id: &SeriesId) -> String {
    mapping
        .role_of(id)
        .map_or_else(|| id.to_string(), |role| role.display_name().to_string())
}
