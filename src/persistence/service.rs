//! The annotation service boundary.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;

use crate::model::ImageId;

use super::error::PersistError;
use super::wire::SaveRequest;

/// Remote (or local) storage of per-image annotations.
///
/// Calls are awaited one at a time by the session; implementations need not
/// be thread-safe.
pub trait AnnotationService {
    /// Fetch the stored payload, `{"annotations": [...]}`, or `None` when
    /// nothing is stored for the image.
    fn fetch(&self, image: &ImageId) -> impl Future<Output = Result<Option<Value>, PersistError>>;

    /// Replace the stored annotations of `image`.
    fn save(
        &self,
        image: &ImageId,
        request: &SaveRequest,
    ) -> impl Future<Output = Result<(), PersistError>>;
}

/// A call received by [`MemoryAnnotationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Fetch(ImageId),
    Save(ImageId),
}

/// In-process service holding payloads in a map.
///
/// Records every call and can be told to fail, which makes it the test
/// double for the session as well as a backend for offline use.
#[derive(Debug, Default)]
pub struct MemoryAnnotationService {
    payloads: RefCell<HashMap<ImageId, Value>>,
    requests: RefCell<HashMap<ImageId, SaveRequest>>,
    calls: RefCell<Vec<ServiceCall>>,
    fail_saves: Cell<bool>,
    fail_fetches: Cell<bool>,
}

impl MemoryAnnotationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored payload.
    pub fn with_payload(self, image: ImageId, payload: Value) -> Self {
        self.payloads.borrow_mut().insert(image, payload);
        self
    }

    pub fn payload(&self, image: &ImageId) -> Option<Value> {
        self.payloads.borrow().get(image).cloned()
    }

    /// The last save request received for `image`.
    pub fn last_request(&self, image: &ImageId) -> Option<SaveRequest> {
        self.requests.borrow().get(image).cloned()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.borrow().clone()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.set(fail);
    }
}

impl AnnotationService for MemoryAnnotationService {
    async fn fetch(&self, image: &ImageId) -> Result<Option<Value>, PersistError> {
        self.calls.borrow_mut().push(ServiceCall::Fetch(image.clone()));
        if self.fail_fetches.get() {
            return Err(PersistError::backend(503, "fetch unavailable"));
        }
        Ok(self.payload(image))
    }

    async fn save(&self, image: &ImageId, request: &SaveRequest) -> Result<(), PersistError> {
        self.calls.borrow_mut().push(ServiceCall::Save(image.clone()));
        if self.fail_saves.get() {
            return Err(PersistError::backend(500, "save rejected"));
        }
        self.payloads
            .borrow_mut()
            .insert(image.clone(), request.to_payload());
        self.requests
            .borrow_mut()
            .insert(image.clone(), request.clone());
        Ok(())
    }
}
