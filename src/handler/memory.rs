// =================================================================
// handler/memory.rs - In-process event and display
// =================================================================
//
// Used when the handler runs outside a browser (the `submit` command)
// and by the tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::traits::{ResultDisplay, SubmitEvent};

/// A submit event that records whether its default action was prevented.
#[derive(Debug, Default)]
pub struct SyntheticSubmit {
    prevented: AtomicBool,
}

impl SyntheticSubmit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.load(Ordering::SeqCst)
    }
}

impl SubmitEvent for SyntheticSubmit {
    fn prevent_default(&self) {
        self.prevented.store(true, Ordering::SeqCst);
    }
}

/// Holds the last text written, and counts the writes.
#[derive(Debug, Default)]
pub struct TextCell {
    state: Mutex<(String, usize)>,
}

impl TextCell {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new((initial.into(), 0)),
        }
    }

    pub fn text(&self) -> String {
        match self.state.lock() {
            Ok(state) => state.0.clone(),
            Err(poisoned) => poisoned.into_inner().0.clone(),
        }
    }

    pub fn writes(&self) -> usize {
        match self.state.lock() {
            Ok(state) => state.1,
            Err(poisoned) => poisoned.into_inner().1,
        }
    }
}

impl ResultDisplay for TextCell {
    fn set_text_content(&self, text: &str) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.0 = text.to_string();
        state.1 += 1;
    }
}
