#![allow(missing_docs)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use credibil_fetch::Reporter;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// initalise tracing once for all tests
static INIT: Once = Once::new();

/// Initialise tracing for tests.
pub fn init_tracer() {
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::ERROR).finish();
        tracing::subscriber::set_global_default(subscriber).expect("subscriber set");
    });
}

/// A diagnostic written by the fetch engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Info(String),
    Debug(String),
}

/// Reporter that records every diagnostic for later inspection.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Recorder {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().expect("lock").clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Info(msg) => Some(msg),
                Entry::Debug(_) => None,
            })
            .collect()
    }

    pub fn debugs(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Debug(msg) => Some(msg),
                Entry::Info(_) => None,
            })
            .collect()
    }
}

impl Reporter for Recorder {
    fn info(&self, message: &str) {
        self.entries.lock().expect("lock").push(Entry::Info(message.to_string()));
    }

    fn debug(&self, message: &str) {
        self.entries.lock().expect("lock").push(Entry::Debug(message.to_string()));
    }
}
