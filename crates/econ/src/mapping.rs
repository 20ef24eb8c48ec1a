//! Static mapping from entity ids to the series they are enriched with.
//!
//! Entities are occupations keyed by SOC code. Each one names up to one
//! series per [`SeriesRole`]; roles are always enumerated in the order
//! price index, unemployment, wages.

use econ_core::SeriesId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// National CPI-U, all items, not seasonally adjusted.
const CPI_ALL_ITEMS: &str = "CUUR0000SA0";
/// National unemployment rate, seasonally adjusted.
const UNEMPLOYMENT_RATE: &str = "LNS14000000";

/// Built-in table: (entity id, price index, unemployment, wages).
const BUILTIN_MAPPINGS: &[(&str, Option<&str>, Option<&str>, Option<&str>)] = &[
    // Software developers
    ("15-1252", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES5000000003")),
    // Data scientists
    ("15-2051", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES6054000003")),
    // Registered nurses
    ("29-1141", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES6562000003")),
    // Elementary school teachers
    ("25-2021", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES6561000003")),
    // Accountants and auditors
    ("13-2011", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES5500000003")),
    // Electricians
    ("47-2111", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES2000000003")),
    // Mechanical engineers
    ("17-2141", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES3000000003")),
    // Retail salespersons
    ("41-2031", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES4200000003")),
    // Chefs and head cooks
    ("35-1011", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), Some("CES7000000003")),
    // Graphic designers: no sector wage series
    ("27-1024", Some(CPI_ALL_ITEMS), Some(UNEMPLOYMENT_RATE), None),
    // Placeholder entry kept so the route layer can list it; nothing configured
    ("99-9999", None, None, None),
];

/// The part a series plays for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesRole {
    /// Consumer price index.
    PriceIndex,
    /// Unemployment rate.
    Unemployment,
    /// Average hourly earnings.
    Wages,
}

impl SeriesRole {
    /// Every role, in enumeration order.
    pub const ALL: [Self; 3] = [Self::PriceIndex, Self::Unemployment, Self::Wages];

    /// Stable role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceIndex => "priceIndex",
            Self::Unemployment => "unemployment",
            Self::Wages => "wages",
        }
    }

    /// Human-readable indicator name for series filling this role.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::PriceIndex => "Consumer Price Index (CPI)",
            Self::Unemployment => "Unemployment Rate",
            Self::Wages => "Average Hourly Earnings",
        }
    }
}

impl fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Series configured for one entity, at most one per role.
///
/// Every role in [`SeriesRole::ALL`] has a slot, kept in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySeriesMapping {
    /// Internal entity id.
    pub entity_id: String,
    series_by_role: Vec<(SeriesRole, Option<SeriesId>)>,
}

impl EntitySeriesMapping {
    /// Creates a mapping with no series configured.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            series_by_role: SeriesRole::ALL.into_iter().map(|role| (role, None)).collect(),
        }
    }

    /// Sets the series for `role`.
    #[must_use]
    pub fn with_series(mut self, role: SeriesRole, id: impl Into<SeriesId>) -> Self {
        if let Some((_, slot)) = self.series_by_role.iter_mut().find(|(r, _)| *r == role) {
            *slot = Some(id.into());
        }
        self
    }

    /// Returns the series filling `role`, if any.
    #[must_use]
    pub fn series_for(&self, role: SeriesRole) -> Option<&SeriesId> {
        self.series_by_role
            .iter()
            .find(|(r, _)| *r == role)
            .and_then(|(_, id)| id.as_ref())
    }

    /// Configured `(role, series)` pairs in role order.
    pub fn series_by_role(&self) -> impl Iterator<Item = (SeriesRole, &SeriesId)> + '_ {
        self.series_by_role
            .iter()
            .filter_map(|(role, id)| id.as_ref().map(|id| (*role, id)))
    }

    /// Distinct configured series ids in role order.
    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        let mut ids: Vec<SeriesId> = Vec::with_capacity(SeriesRole::ALL.len());
        for (_, id) in self.series_by_role() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// The first role `id` fills, if any.
    #[must_use]
    pub fn role_of(&self, id: &SeriesId) -> Option<SeriesRole> {
        self.series_by_role()
            .find(|(_, candidate)| *candidate == id)
            .map(|(role, _)| role)
    }

    /// Returns true if no role has a series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series_by_role().next().is_none()
    }
}

/// Lookup from entity id to its series mapping.
pub trait SeriesMapper: Send + Sync + fmt::Debug {
    /// Returns the mapping for `entity_id`, or `None` when no enrichment is
    /// configured for it.
    fn mapping_for(&self, entity_id: &str) -> Option<&EntitySeriesMapping>;
}

/// [`SeriesMapper`] over an immutable in-memory table.
#[derive(Clone, Debug, Default)]
pub struct StaticSeriesMapper {
    mappings: HashMap<String, EntitySeriesMapping>,
}

impl StaticSeriesMapper {
    /// Creates a mapper from explicit mappings. Later duplicates win.
    #[must_use]
    pub fn from_mappings(mappings: impl IntoIterator<Item = EntitySeriesMapping>) -> Self {
        Self {
            mappings: mappings
                .into_iter()
                .map(|m| (m.entity_id.clone(), m))
                .collect(),
        }
    }

    /// The built-in occupation table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<StaticSeriesMapper> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_mappings(BUILTIN_MAPPINGS.iter().map(
                |&(entity, price_index, unemployment, wages)| {
                    SeriesRole::ALL
                        .into_iter()
                        .zip([price_index, unemployment, wages])
                        .filter_map(|(role, id)| id.map(|id| (role, id)))
                        .fold(EntitySeriesMapping::new(entity), |mapping, (role, id)| {
                            mapping.with_series(role, id)
                        })
                },
            ))
        })
    }

    /// Number of configured entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if no entity is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl SeriesMapper for StaticSeriesMapper {
    fn mapping_for(&self, entity_id: &str) -> Option<&EntitySeriesMapping> {
        self.mappings.get(entity_id)
    }
}

/// Looks `entity_id` up in the built-in table.
#[must_use]
pub fn mapping_for(entity_id: &str) -> Option<&'static EntitySeriesMapping> {
    StaticSeriesMapper::builtin().mapping_for(entity_id)
}
