use bc_core::{Customer, ErrorLocation, NewBroadcast, NewCustomer, NewDeliveryRecord};
use bc_db::{DbError, Result as DbErrorResult};
use bc_dispatch::{
    ChatId, PrimarySource, ReadinessSignal, SecondaryStore, SendOptions, SheetRow, SourceError,
    Transport, TransportError, TransportMessageId,
};
use bc_dispatch::sources::SourceResult;
use bc_dispatch::transport::TransportResult;

use std::collections::HashSet;
use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::watch;

const CHAT_SUFFIX: &str = "@c.us";

/// In-process transport: numbers resolve to `{n}@c.us`, sends return `msg-{n}`.
pub struct MockTransport {
    signal: ReadinessSignal,
    unregistered: HashSet<String>,
    failing: HashSet<String>,
    lookups: AtomicUsize,
    sent: Mutex<Vec<SentMessage>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub number: String,
    pub body: String,
    pub with_media: bool,
}

impl MockTransport {
    pub fn ready() -> Self {
        Self::with_readiness(true)
    }

    pub fn not_ready() -> Self {
        Self::with_readiness(false)
    }

    fn with_readiness(ready: bool) -> Self {
        Self {
            signal: ReadinessSignal::new(ready),
            unregistered: HashSet::new(),
            failing: HashSet::new(),
            lookups: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn unregistered(mut self, numbers: &[&str]) -> Self {
        self.unregistered
            .extend(numbers.iter().map(|n| n.to_string()));
        self
    }

    pub fn failing(mut self, numbers: &[&str]) -> Self {
        self.failing.extend(numbers.iter().map(|n| n.to_string()));
        self
    }

    pub fn set_ready(&self, ready: bool) {
        self.signal.set(ready);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn readiness(&self) -> watch::Receiver<bool> {
        self.signal.subscribe()
    }

    async fn resolve_routable_id(&self, number: &str) -> TransportResult<Option<ChatId>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unregistered.contains(number) {
            return Ok(None);
        }
        Ok(Some(ChatId(format!("{}{}", number, CHAT_SUFFIX))))
    }

    async fn send(
        &self,
        chat_id: &ChatId,
        body: &str,
        options: &SendOptions,
    ) -> TransportResult<Option<TransportMessageId>> {
        let number = chat_id
            .as_str()
            .trim_end_matches(CHAT_SUFFIX)
            .to_string();

        if self.failing.contains(&number) {
            return Err(TransportError::rejected(500, "gateway exploded"));
        }

        self.sent.lock().unwrap().push(SentMessage {
            number: number.clone(),
            body: body.to_string(),
            with_media: options.media.is_some(),
        });
        Ok(Some(format!("msg-{}", number)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StoreFailure {
    None,
    /// Every call fails with a non-retryable error
    Permanent,
    /// The next `n` writes of delivery records time out, then succeed
    Transient(usize),
}

/// Secondary store kept in memory
pub struct MemoryStore {
    customers: Mutex<Vec<Customer>>,
    broadcasts: Mutex<Vec<NewBroadcast>>,
    records: Mutex<Vec<NewDeliveryRecord>>,
    failure: Mutex<StoreFailure>,
    record_attempts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
            records: Mutex::new(Vec::new()),
            failure: Mutex::new(StoreFailure::None),
            record_attempts: AtomicUsize::new(0),
        }
    }

    pub fn with_customers(phones: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut customers = store.customers.lock().unwrap();
            for (i, phone) in phones.iter().enumerate() {
                customers.push(Customer {
                    id: Some(i as i64 + 1),
                    name: Some(format!("Customer {}", i + 1)),
                    phone: Some(phone.to_string()),
                    email: None,
                    metadata: json!({}),
                    created_at: None,
                });
            }
        }
        store
    }

    pub fn broken() -> Self {
        let store = Self::new();
        *store.failure.lock().unwrap() = StoreFailure::Permanent;
        store
    }

    pub fn flaky(failures: usize) -> Self {
        let store = Self::new();
        *store.failure.lock().unwrap() = StoreFailure::Transient(failures);
        store
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<NewBroadcast> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<NewDeliveryRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn record_attempts(&self) -> usize {
        self.record_attempts.load(Ordering::SeqCst)
    }

    fn check(&self) -> DbErrorResult<()> {
        match *self.failure.lock().unwrap() {
            StoreFailure::Permanent => Err(DbError::Initialization {
                message: "database unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SecondaryStore for MemoryStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> DbErrorResult<Customer> {
        self.check()?;
        let mut customers = self.customers.lock().unwrap();
        let created = Customer {
            id: Some(customers.len() as i64 + 1),
            name: customer.name.clone(),
            phone: Some(customer.phone.clone()),
            email: customer.email.clone(),
            metadata: customer.metadata.clone().unwrap_or_default(),
            created_at: None,
        };
        customers.push(created.clone());
        Ok(created)
    }

    async fn list_customers(&self) -> DbErrorResult<Vec<Customer>> {
        self.check()?;
        Ok(self.customers())
    }

    async fn insert_broadcast(&self, broadcast: &NewBroadcast) -> DbErrorResult<i64> {
        self.check()?;
        let mut broadcasts = self.broadcasts.lock().unwrap();
        broadcasts.push(broadcast.clone());
        Ok(broadcasts.len() as i64)
    }

    async fn insert_delivery_record(&self, record: &NewDeliveryRecord) -> DbErrorResult<i64> {
        self.record_attempts.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        {
            let mut failure = self.failure.lock().unwrap();
            if let StoreFailure::Transient(remaining) = *failure
                && remaining > 0
            {
                *failure = StoreFailure::Transient(remaining - 1);
                return Err(DbError::Sqlx {
                    source: sqlx::Error::PoolTimedOut,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(records.len() as i64)
    }
}

/// Primary source serving a fixed set of rows
pub struct StaticSource {
    rows: Mutex<Vec<SheetRow>>,
    fail: bool,
    fetches: AtomicUsize,
    appended: Mutex<Vec<SheetRow>>,
}

impl StaticSource {
    pub fn new(rows: Vec<SheetRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail: false,
            fetches: AtomicUsize::new(0),
            appended: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn set_rows(&self, rows: Vec<SheetRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn appended(&self) -> Vec<SheetRow> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl PrimarySource for StaticSource {
    async fn fetch_all(&self) -> SourceResult<Vec<SheetRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::api(503, "sheet backend unavailable"));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append(&self, row: &SheetRow) -> SourceResult<()> {
        if self.fail {
            return Err(SourceError::api(503, "sheet backend unavailable"));
        }
        self.appended.lock().unwrap().push(row.clone());
        Ok(())
    }
}

/// A sheet row with `Name` and `Phone` columns
pub fn sheet_row(name: &str, phone: &str) -> SheetRow {
    json!({ "Name": name, "Phone": phone })
        .as_object()
        .cloned()
        .unwrap_or_default()
}
