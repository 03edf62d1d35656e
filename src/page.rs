//! Page-level state for one resource list view.
//!
//! A page loads its collection (seeding it when empty), renders the filtered
//! cache, and runs create/update/delete through the store followed by a
//! refresh. Failures become a dismissible banner and leave the cache alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

use crate::errors::ResourceError;
use crate::filter::{self, FilterState, Tally};
use crate::models::Resource;
use crate::store::ResourceStore;

/// Which dialog, if any, the page has open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode<T> {
    #[default]
    Closed,
    Viewing(T),
    /// Holds the pending edit buffer, a full copy of the record.
    Editing(T),
    ConfirmingDelete(T),
}

impl<T> DialogMode<T> {
    pub fn is_closed(&self) -> bool {
        matches!(self, DialogMode::Closed)
    }
}

/// Result of a page action, from the page's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The call succeeded and the page state was updated.
    Applied,
    /// The call failed or was refused; the banner holds the reason.
    Failed,
    /// The page was unmounted while the call was in flight; nothing was applied.
    Discarded,
}

/// Shared "still mounted" flag for a page.
#[derive(Debug, Clone)]
pub struct MountHandle(Arc<AtomicBool>);

impl MountHandle {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct ResourcePage<T: Resource> {
    store: ResourceStore<T>,
    defaults: Vec<T>,
    seed_on_empty: bool,
    mount: MountHandle,
    loading: bool,
    error: Option<String>,
    mode: DialogMode<T>,
    filter: FilterState,
}

impl<T: Resource> ResourcePage<T> {
    pub fn new(store: ResourceStore<T>) -> Self {
        Self {
            store,
            defaults: T::defaults(),
            seed_on_empty: true,
            mount: MountHandle::new(),
            loading: false,
            error: None,
            mode: DialogMode::Closed,
            filter: FilterState::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: Vec<T>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_seed_on_empty(mut self, seed: bool) -> Self {
        self.seed_on_empty = seed;
        self
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn mode(&self) -> &DialogMode<T> {
        &self.mode
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filter.set_filter(field, value);
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// The full cached collection, as last listed.
    pub fn rows(&self) -> Arc<Vec<T>> {
        self.store.cached()
    }

    /// Rows matching the current search and dropdowns.
    pub fn visible(&self) -> Vec<T> {
        filter::apply_cloned(&self.store.cached(), &self.filter)
    }

    /// Summary counts over the whole collection, ignoring the current filter.
    pub fn tally(&self, field: &str) -> Tally {
        Tally::by_field(&self.store.cached(), field)
    }

    fn find(&self, id: &str) -> Option<T> {
        self.store.cached().iter().find(|r| r.id() == id).cloned()
    }

    pub fn open_view(&mut self, id: &str) -> bool {
        self.open_with(id, DialogMode::Viewing)
    }

    /// Opens the edit dialog with a copy of the cached record as its buffer.
    pub fn open_edit(&mut self, id: &str) -> bool {
        self.open_with(id, DialogMode::Editing)
    }

    pub fn open_delete(&mut self, id: &str) -> bool {
        self.open_with(id, DialogMode::ConfirmingDelete)
    }

    fn open_with(&mut self, id: &str, mode: fn(T) -> DialogMode<T>) -> bool {
        match self.find(id) {
            Some(record) => {
                self.mode = mode(record);
                true
            }
            None => false,
        }
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut T> {
        match &mut self.mode {
            DialogMode::Editing(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn close_dialog(&mut self) {
        self.mode = DialogMode::Closed;
    }

    /// Lists the collection, seeding it from the defaults when it is empty.
    pub async fn load(&mut self) -> PageOutcome {
        self.loading = true;
        let result = self.store.fetch().await;
        let records = match result {
            Ok(records) if records.is_empty() && self.seed_on_empty && !self.defaults.is_empty() => {
                let defaults = self.defaults.clone();
                let seeded = self.seed(defaults).await;
                if !self.mount.is_mounted() {
                    return self.discard();
                }
                match seeded {
                    Ok(records) => records,
                    Err(err) => return self.fail(err),
                }
            }
            Ok(records) => records,
            Err(err) => {
                if !self.mount.is_mounted() {
                    return self.discard();
                }
                return self.fail(err);
            }
        };

        if !self.mount.is_mounted() {
            return self.discard();
        }
        self.store.replace_cache(records);
        self.loading = false;
        PageOutcome::Applied
    }

    async fn seed(&self, defaults: Vec<T>) -> Result<Vec<T>, ResourceError> {
        let mut scratch = self.store.clone();
        let seeded = scratch.seed_if_empty(defaults).await?;
        Ok(seeded.as_ref().clone())
    }

    /// Validates and creates `record`, then refreshes.
    pub async fn submit_create(&mut self, record: T) -> PageOutcome {
        if let Err(err) = record.validate() {
            return self.fail(err.into());
        }
        self.loading = true;
        let result = self.store.create(record).await;
        self.after_mutation(result.map(|_| ())).await
    }

    /// Saves the edit buffer as a full-record replacement, then refreshes.
    ///
    /// On failure the dialog stays open with the buffer intact.
    pub async fn submit_edit(&mut self) -> PageOutcome {
        let buffer = match &self.mode {
            DialogMode::Editing(buffer) => buffer.clone(),
            _ => return self.fail(ResourceError::new("No record is being edited")),
        };
        if let Err(err) = buffer.validate() {
            return self.fail(err.into());
        }
        self.loading = true;
        let id = buffer.id().to_string();
        let result = self.store.update(&id, buffer).await;
        self.after_mutation(result.map(|_| ())).await
    }

    /// Applies `change` to a copy of the cached record and sends the whole
    /// record back. Used for quick actions such as status toggles.
    pub async fn submit_update<F>(&mut self, id: &str, change: F) -> PageOutcome
    where
        F: FnOnce(&mut T),
    {
        let mut record = match self.find(id) {
            Some(record) => record,
            None => return self.fail(ResourceError::not_found(T::COLLECTION, id)),
        };
        change(&mut record);
        self.loading = true;
        let result = self.store.update(id, record).await;
        self.after_mutation(result.map(|_| ())).await
    }

    /// Deletes the record awaiting confirmation, then refreshes.
    pub async fn submit_delete(&mut self) -> PageOutcome {
        if !T::DELETABLE {
            return self.fail(ResourceError::new(format!(
                "{} cannot be deleted; set the status to inactive instead",
                T::COLLECTION
            )));
        }
        let id = match &self.mode {
            DialogMode::ConfirmingDelete(record) => record.id().to_string(),
            _ => return self.fail(ResourceError::new("No record is selected for deletion")),
        };
        self.loading = true;
        let result = self.store.delete(&id).await;
        self.after_mutation(result).await
    }

    async fn after_mutation(&mut self, result: Result<(), ResourceError>) -> PageOutcome {
        if let Err(err) = result {
            if !self.mount.is_mounted() {
                return self.discard();
            }
            return self.fail(err);
        }

        let refreshed = self.store.fetch().await;
        if !self.mount.is_mounted() {
            return self.discard();
        }
        match refreshed {
            Ok(records) => {
                debug!(collection = T::COLLECTION, count = records.len(), "Page refreshed");
                self.store.replace_cache(records);
                self.loading = false;
                self.error = None;
                self.mode = DialogMode::Closed;
                PageOutcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    fn discard(&mut self) -> PageOutcome {
        self.loading = false;
        PageOutcome::Discarded
    }

    fn fail(&mut self, err: ResourceError) -> PageOutcome {
        warn!(collection = T::COLLECTION, error = %err, "Page action failed");
        self.loading = false;
        self.error = Some(err.banner_text());
        PageOutcome::Failed
    }
}
