use crate::metrics::DispatchMetrics;
use crate::sources::{PrimarySource, SheetRow, SourceError, row_to_customer};
use crate::store::SecondaryStore;

use bc_core::{CoreError, Customer, CustomerSource, NewCustomer};
use bc_db::DbError;

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use error_location::ErrorLocation;
use log::{debug, info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No data source available (no sheet data and database not configured) {location}")]
    NoDataSource { location: ErrorLocation },

    #[error("Primary source not configured {location}")]
    PrimaryNotConfigured { location: ErrorLocation },

    #[error("Primary source error: {source} {location}")]
    Primary {
        #[source]
        source: SourceError,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Secondary {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Invalid customer: {source} {location}")]
    Invalid {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl From<SourceError> for ResolveError {
    #[track_caller]
    fn from(source: SourceError) -> Self {
        Self::Primary {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for ResolveError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Secondary {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for ResolveError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Invalid {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Customers from exactly one source
#[derive(Debug, Clone)]
pub struct CustomerSet {
    pub source: CustomerSource,
    pub records: Arc<Vec<Customer>>,
}

#[derive(Debug)]
struct CacheEntry {
    fetched_at: Instant,
    records: Arc<Vec<Customer>>,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Picks the customer list from the primary source, falling back to the
/// secondary store when the primary is empty or failing.
///
/// Only primary results are cached. The cache holds a single entry that is
/// replaced wholesale, so concurrent refreshes simply race and the last one wins.
pub struct CustomerResolver {
    primary: Option<Arc<dyn PrimarySource>>,
    secondary: Option<Arc<dyn SecondaryStore>>,
    cache: ArcSwapOption<CacheEntry>,
    ttl: Duration,
    metrics: DispatchMetrics,
}

impl CustomerResolver {
    pub fn new(
        primary: Option<Arc<dyn PrimarySource>>,
        secondary: Option<Arc<dyn SecondaryStore>>,
        ttl: Duration,
        metrics: DispatchMetrics,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache: ArcSwapOption::empty(),
            ttl,
            metrics,
        }
    }

    pub async fn get_customers(&self, force: bool) -> Result<CustomerSet> {
        if let Some(ref primary) = self.primary {
            match self.from_primary(primary.as_ref(), force).await {
                Ok(Some(records)) => {
                    self.metrics.resolver_source(CustomerSource::Primary.as_str());
                    return Ok(CustomerSet {
                        source: CustomerSource::Primary,
                        records,
                    });
                }
                Ok(None) => info!("Primary source returned no rows, using database"),
                Err(e) => warn!("Error reading primary source, falling back to database: {}", e),
            }
            self.metrics.resolver_fallback();
        }

        let Some(ref secondary) = self.secondary else {
            return Err(ResolveError::NoDataSource {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        match secondary.list_customers().await {
            Ok(records) => {
                self.metrics
                    .resolver_source(CustomerSource::Secondary.as_str());
                Ok(CustomerSet {
                    source: CustomerSource::Secondary,
                    records: Arc::new(records),
                })
            }
            Err(e) => {
                warn!("Database read failed, no customer source left: {}", e);
                Err(ResolveError::NoDataSource {
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// `Ok(None)` when the primary answered with zero rows.
    async fn from_primary(
        &self,
        primary: &dyn PrimarySource,
        force: bool,
    ) -> std::result::Result<Option<Arc<Vec<Customer>>>, SourceError> {
        if !force
            && let Some(entry) = self.cache.load_full()
            && entry.is_fresh(self.ttl)
        {
            self.metrics.resolver_cache_hit();
            debug!("Serving {} customers from cache", entry.records.len());
            return Ok(Some(Arc::clone(&entry.records)));
        }

        let rows = primary.fetch_all().await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let records: Arc<Vec<Customer>> = Arc::new(rows.iter().map(row_to_customer).collect());
        self.cache.store(Some(Arc::new(CacheEntry {
            fetched_at: Instant::now(),
            records: Arc::clone(&records),
        })));

        Ok(Some(records))
    }

    /// Insert into the secondary store; the primary source is never written here.
    pub async fn add_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        customer.validate()?;

        let Some(ref secondary) = self.secondary else {
            return Err(ResolveError::NoDataSource {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(secondary.insert_customer(customer).await?)
    }

    /// Append a row to the primary source and drop the cached copy.
    pub async fn append_primary(&self, row: &SheetRow) -> Result<()> {
        let Some(ref primary) = self.primary else {
            return Err(ResolveError::PrimaryNotConfigured {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        primary.append(row).await?;
        self.invalidate();
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.store(None);
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}
