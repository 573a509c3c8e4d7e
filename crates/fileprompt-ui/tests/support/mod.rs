//! In-memory backend and session builder shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use fileprompt_api_models::{DeleteAck, HistoryEntry, HistoryItem, SaveAck, Timestamp};
use fileprompt_ui::core::api::ConversionApi;
use fileprompt_ui::core::config::UiConfig;
use fileprompt_ui::core::errors::ApiError;
use fileprompt_ui::core::scheduler::{ManualScheduler, Scheduler};
use fileprompt_ui::core::selection::PendingFile;
use fileprompt_ui::core::session::Session;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use tokio::sync::oneshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    Save,
    History,
    Item,
    Download,
    DeleteItem,
    DeleteAll,
}

/// Backend double: keeps a server-side history list and counts every call.
#[derive(Default)]
pub struct FakeApi {
    pub entries: RefCell<Vec<HistoryEntry>>,
    pub contents: RefCell<HashMap<String, String>>,
    pub converted: RefCell<Option<String>>,
    pub uploads: RefCell<Vec<Vec<String>>>,
    /// Answer saves with a body that is not a `SaveAck`.
    pub opaque_save_ack: Cell<bool>,
    history_gates: RefCell<VecDeque<oneshot::Receiver<Vec<HistoryEntry>>>>,
    failures: RefCell<HashMap<Endpoint, VecDeque<ApiError>>>,
    calls: RefCell<HashMap<Endpoint, usize>>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        let api = Self::default();
        *api.entries.borrow_mut() = entries;
        api
    }

    /// Make the next call to `endpoint` fail with `err`.
    pub fn fail_next(&self, endpoint: Endpoint, err: ApiError) {
        self.failures
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(err);
    }

    /// Hold the next history response until the returned sender fires.
    pub fn gate_history(&self) -> oneshot::Sender<Vec<HistoryEntry>> {
        let (tx, rx) = oneshot::channel();
        self.history_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.borrow().get(&endpoint).copied().unwrap_or(0)
    }

    fn hit(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        *self.calls.borrow_mut().entry(endpoint).or_default() += 1;
        let failure = self
            .failures
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        failure.map_or(Ok(()), Err)
    }
}

pub fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".to_string(),
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

pub fn entry(id: &str, files: &[&str]) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        timestamp: Timestamp::from("2024-05-01T12:30:00Z"),
        original_files: files.iter().map(|name| (*name).to_string()).collect(),
        file_count: files.len(),
    }
}

pub fn file(name: &str, body: &str) -> PendingFile<String> {
    PendingFile::new(name, body.len() as u64, body.to_string())
}

#[async_trait(?Send)]
impl ConversionApi for FakeApi {
    type Blob = String;

    async fn upload(&self, files: &[PendingFile<String>]) -> Result<String, ApiError> {
        self.hit(Endpoint::Upload)?;
        let names = files.iter().map(|f| f.name().to_string()).collect::<Vec<_>>();
        self.uploads.borrow_mut().push(names.clone());
        Ok(self
            .converted
            .borrow()
            .clone()
            .unwrap_or_else(|| names.join("\n")))
    }

    async fn save(&self, files: &[PendingFile<String>]) -> Result<Option<SaveAck>, ApiError> {
        self.hit(Endpoint::Save)?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let names = files.iter().map(PendingFile::name).collect::<Vec<_>>();
        let saved = entry(&format!("saved-{id}"), &names);
        self.entries.borrow_mut().insert(0, saved.clone());
        Ok((!self.opaque_save_ack.get()).then_some(saved))
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.hit(Endpoint::History)?;
        let gate = self.history_gates.borrow_mut().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .map_err(|_| ApiError::Network("gate dropped".to_string())),
            None => Ok(self.entries.borrow().clone()),
        }
    }

    async fn item(&self, id: &str) -> Result<HistoryItem, ApiError> {
        self.hit(Endpoint::Item)?;
        let content = self.contents.borrow().get(id).cloned().ok_or_else(not_found)?;
        Ok(HistoryItem {
            content,
            entry: None,
        })
    }

    async fn download(&self, id: &str, filename: &str) -> Result<Vec<u8>, ApiError> {
        self.hit(Endpoint::Download)?;
        Ok(format!("{id}/{filename}").into_bytes())
    }

    async fn delete_item(&self, id: &str) -> Result<Option<DeleteAck>, ApiError> {
        self.hit(Endpoint::DeleteItem)?;
        self.entries.borrow_mut().retain(|entry| entry.id != id);
        Ok(Some(DeleteAck {
            message: "Data deleted successfully".to_string(),
        }))
    }

    async fn delete_all(&self) -> Result<Option<DeleteAck>, ApiError> {
        self.hit(Endpoint::DeleteAll)?;
        self.entries.borrow_mut().clear();
        Ok(None)
    }
}

pub struct Harness {
    pub session: Session<FakeApi>,
    pub clock: ManualScheduler,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        let clock = ManualScheduler::default();
        let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
        Self {
            session: Session::new(UiConfig::default(), api, scheduler),
            clock,
        }
    }

    pub fn api(&self) -> &FakeApi {
        self.session.api()
    }
}
