//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Both presentation layers (HTTP and MCP) go through these traits only.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{CreatedItinerary, Id, ItineraryDetail, ItineraryQuery, ItinerarySummary, NewItinerary},
};

/// Repository for Itinerary operations.
pub trait ItineraryRepository: Send + Sync {
    /// List itinerary summaries matching the query, ordered by id.
    fn list(
        &self,
        query: &ItineraryQuery,
    ) -> impl Future<Output = DbResult<Vec<ItinerarySummary>>> + Send;

    /// Get an itinerary with its days, transfers, hotel stays and activities.
    ///
    /// Returns `DbError::NotFound` when no itinerary has this id.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<ItineraryDetail>> + Send;

    /// Create an itinerary and all of its days atomically.
    ///
    /// Invalid payloads fail with `DbError::Validation` before anything is
    /// written. Activity ids that match no activity are skipped and reported
    /// in the result.
    fn create(
        &self,
        itinerary: &NewItinerary,
    ) -> impl Future<Output = DbResult<CreatedItinerary>> + Send;
}

/// Counts of records written by the seed loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub locations: usize,
    pub hotels: usize,
    pub transfers: usize,
    pub activities: usize,
    pub itineraries: usize,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.locations + self.hotels + self.transfers + self.activities + self.itineraries
    }
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Itineraries<'a>: ItineraryRepository
    where
        Self: 'a;

    /// Create the schema if it does not exist yet.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Load the demonstration catalog unless locations already exist.
    ///
    /// Returns `None` when the database was already seeded.
    fn ensure_seeded(&self) -> impl Future<Output = DbResult<Option<SeedSummary>>> + Send;

    /// Get the itinerary repository.
    fn itineraries(&self) -> Self::Itineraries<'_>;
}
