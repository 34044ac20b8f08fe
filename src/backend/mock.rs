use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{BackendError, ClassifierBackend};

/// Scripted backend for testing — replays configured responses in order
/// and counts calls.
#[derive(Debug)]
pub struct MockBackend {
    script: Mutex<VecDeque<Result<String, String>>>,
    /// Returned once the script runs out.
    fallback: String,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Backend that always returns the same response.
    pub fn new(response: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a response to be returned before the fallback.
    pub fn push_response(self, response: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    /// Queue a failure to be returned before the fallback.
    pub fn push_failure(self, reason: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    /// How many times `classify` has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassifierBackend for MockBackend {
    fn classify(&self, _prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(BackendError::HttpClient(reason)),
            None => Ok(self.fallback.clone()),
        }
    }

    fn provider(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
