use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Outcome message for one mutation attempt, rendered as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
    pub message: String,
}

impl FeedbackEvent {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget notification sink.
pub trait FeedbackSink: Send + Sync {
    fn notify(&self, event: FeedbackEvent);
}

impl<F> FeedbackSink for F
where
    F: Fn(FeedbackEvent) + Send + Sync,
{
    fn notify(&self, event: FeedbackEvent) {
        self(event)
    }
}

/// Sink that keeps every event, for inspection.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, event: FeedbackEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
