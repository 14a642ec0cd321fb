//! Named collections, backend selection, and the bundle the request layer uses.

use crate::backend::RecordStore;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::file::FileStore;
use crate::models::{Admin, Case, CaseUpdate, ChannelConfig, User, SUBMITTED_MESSAGE};
use crate::record::Record;
use tracing::info;

#[cfg(feature = "remote")]
use crate::remote::{HttpClient, RemoteTable, RestClient};
#[cfg(feature = "remote")]
use std::sync::Arc;

/// The fixed set of collections. Each maps 1:1 to a local document and a
/// remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// [`User`] records.
    Users,
    /// [`Case`] records.
    Cases,
    /// [`CaseUpdate`] records.
    Updates,
    /// [`Admin`] records.
    Admins,
    /// [`ChannelConfig`] records.
    Config,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Cases,
        Collection::Updates,
        Collection::Admins,
        Collection::Config,
    ];

    /// Collection name; also the remote table name.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Cases => "cases",
            Collection::Updates => "updates",
            Collection::Admins => "admins",
            Collection::Config => "config",
        }
    }

    /// Local document name, `<name>.json`.
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

/// Which medium a [`Storage`] was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// JSON documents under the data directory.
    File,
    /// Rows of a remote table API.
    Remote,
}

/// Opens collections on whichever backend the config selects.
///
/// The choice is made once, in [`Selector::new`], and every collection opened
/// through the same selector lands on the same backend.
pub struct Selector {
    config: StoreConfig,
    #[cfg(feature = "remote")]
    client: Option<Arc<dyn HttpClient>>,
}

impl Selector {
    /// Decide the backend for `config`. Remote wins when both endpoint and key
    /// are set (and the crate was built with the `remote` feature).
    #[cfg(feature = "remote")]
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client: Option<Arc<dyn HttpClient>> = match &config.remote {
            Some(remote) => Some(Arc::new(RestClient::new(remote.url.clone())?)),
            None => None,
        };
        Ok(Self { config, client })
    }

    /// Decide the backend for `config`. Without the `remote` feature this is
    /// always local files.
    #[cfg(not(feature = "remote"))]
    pub fn new(config: StoreConfig) -> Result<Self> {
        if config.remote.is_some() {
            tracing::warn!("remote table configured but the `remote` feature is disabled; using local files");
        }
        Ok(Self { config })
    }

    /// Use `client` for the remote table instead of the built-in HTTP client.
    /// Has no effect unless the config carries remote settings.
    #[cfg(feature = "remote")]
    pub fn with_client(config: StoreConfig, client: Arc<dyn HttpClient>) -> Self {
        let client = config.remote.as_ref().map(|_| client);
        Self { config, client }
    }

    /// The backend every collection from this selector uses.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        if self.is_remote() {
            BackendKind::Remote
        } else {
            BackendKind::File
        }
    }

    /// Open `collection` as a store of `T`.
    pub fn open<T: Record>(&self, collection: Collection) -> Box<dyn RecordStore<T>> {
        if let Some(store) = self.open_remote(collection) {
            return store;
        }
        Box::new(FileStore::<T>::open(&self.config.data_dir, &collection.file_name()))
    }

    #[cfg(feature = "remote")]
    fn is_remote(&self) -> bool {
        self.client.is_some()
    }

    #[cfg(not(feature = "remote"))]
    fn is_remote(&self) -> bool {
        false
    }

    #[cfg(feature = "remote")]
    fn open_remote<T: Record>(&self, collection: Collection) -> Option<Box<dyn RecordStore<T>>> {
        let (client, remote) = (self.client.as_ref()?, self.config.remote.as_ref()?);
        Some(Box::new(RemoteTable::<T>::new(
            Arc::clone(client),
            remote.key.clone(),
            collection.name(),
        )))
    }

    #[cfg(not(feature = "remote"))]
    fn open_remote<T: Record>(&self, _collection: Collection) -> Option<Box<dyn RecordStore<T>>> {
        None
    }

    /// The config this selector was built from.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("kind", &self.kind())
            .field("config", &self.config)
            .finish()
    }
}

/// One store per collection, all on the same backend.
///
/// Built once at startup and shared (e.g. behind an `Arc`) with whatever
/// handles requests. Nothing here branches on the backend after construction.
pub struct Storage {
    /// Registered users.
    pub users: Box<dyn RecordStore<User>>,
    /// Submitted cases.
    pub cases: Box<dyn RecordStore<Case>>,
    /// Case timeline entries.
    pub updates: Box<dyn RecordStore<CaseUpdate>>,
    /// Back-office accounts.
    pub admins: Box<dyn RecordStore<Admin>>,
    /// Channel configuration; only the first record is used.
    pub config: Box<dyn RecordStore<ChannelConfig>>,
    kind: BackendKind,
}

impl Storage {
    /// Select a backend from `config` and open every collection on it.
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::from_selector(&Selector::new(config)?))
    }

    /// Open every collection through an existing selector.
    pub fn from_selector(selector: &Selector) -> Self {
        let kind = selector.kind();
        match kind {
            BackendKind::File => info!(dir = %selector.config().data_dir.display(), "storage backend: local files"),
            BackendKind::Remote => info!("storage backend: remote table"),
        }
        Self {
            users: selector.open(Collection::Users),
            cases: selector.open(Collection::Cases),
            updates: selector.open(Collection::Updates),
            admins: selector.open(Collection::Admins),
            config: selector.open(Collection::Config),
            kind,
        }
    }

    /// Backend the collections live on.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    // ---- queries ----

    /// User registered under exactly `email` (case-sensitive).
    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.find_one(&|u: &User| u.email == email)
    }

    /// Store a new case and its initial system update. Returns the stored case.
    pub fn submit_case(&self, case: Case) -> Result<Case> {
        let case = self.cases.create(case)?;
        self.updates
            .create(CaseUpdate::system(case.id.clone(), SUBMITTED_MESSAGE))?;
        Ok(case)
    }

    /// Cases owned by `user_id`, newest first.
    pub fn cases_for_user(&self, user_id: &str) -> Result<Vec<Case>> {
        let mut cases = self.cases.find_many(&|c: &Case| c.user_id == user_id)?;
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cases)
    }

    /// Timeline of `case_id`, newest first.
    pub fn updates_for_case(&self, case_id: &str) -> Result<Vec<CaseUpdate>> {
        let mut updates = self.updates.find_many(&|u: &CaseUpdate| u.case_id == case_id)?;
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(updates)
    }

    /// First config record, or [`ChannelConfig::fallback`] when there is none.
    pub fn channel_config(&self) -> Result<ChannelConfig> {
        Ok(self
            .config
            .read_all()?
            .into_iter()
            .next()
            .unwrap_or_else(ChannelConfig::fallback))
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
