use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

/// Maximum number of events retained in the ring buffer.
const EVENT_LOG_CAPACITY: usize = 200;

/// A typed event from the fetch pipeline.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    TopAnimeRequested {
        url: String,
    },
    TopAnimeLoaded {
        count: usize,
    },
    TopAnimeFailed {
        message: String,
    },
    RecommendationsRequested {
        title: String,
        ticket: u64,
    },
    RecommendationsLoaded {
        title: String,
        count: usize,
    },
    RecommendationsFailed {
        title: String,
        message: String,
    },
    RecommendationsDiscarded {
        ticket: u64,
    },
    CoverFailed {
        url: String,
        message: String,
    },
}

impl FetchEvent {
    /// Whether the event records a failed fetch, including the initial load.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::TopAnimeFailed { .. } | Self::RecommendationsFailed { .. } | Self::CoverFailed { .. }
        )
    }
}

impl fmt::Display for FetchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopAnimeRequested { url } => write!(f, "Fetching top anime from {url}"),
            Self::TopAnimeLoaded { count } => write!(f, "Loaded {count} anime"),
            Self::TopAnimeFailed { message } => write!(f, "Top anime failed: {message}"),
            Self::RecommendationsRequested { title, .. } => {
                write!(f, "Fetching recommendations for {title}")
            }
            Self::RecommendationsLoaded { title, count } => {
                write!(f, "{count} recommendations for {title}")
            }
            Self::RecommendationsFailed { title, message } => {
                write!(f, "Error fetching recommendations for {title}: {message}")
            }
            Self::RecommendationsDiscarded { ticket } => {
                write!(f, "Discarded outdated recommendations (request #{ticket})")
            }
            Self::CoverFailed { url, message } => write!(f, "Cover {url} failed: {message}"),
        }
    }
}

/// A timestamped event entry.
pub type EventEntry = (DateTime<Utc>, FetchEvent);

/// Bounded ring buffer of fetch events.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<EventEntry>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    /// Push a new event, evicting the oldest if at capacity.
    pub fn push(&mut self, event: FetchEvent) {
        if self.entries.len() >= EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((Utc::now(), event));
    }

    /// Most recent event, if any.
    pub fn latest(&self) -> Option<&EventEntry> {
        self.entries.back()
    }

    /// Number of failures currently retained.
    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|(_, e)| e.is_failure()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_latest() {
        let mut log = EventLog::new();
        assert!(log.latest().is_none());

        log.push(FetchEvent::TopAnimeLoaded { count: 20 });
        log.push(FetchEvent::RecommendationsFailed {
            title: "Naruto".into(),
            message: "HTTP error! status: 500".into(),
        });

        let (_, latest) = log.latest().unwrap();
        assert_eq!(
            latest.to_string(),
            "Error fetching recommendations for Naruto: HTTP error! status: 500"
        );
        assert_eq!(log.failure_count(), 1);
    }

    #[test]
    fn test_every_failure_kind_is_counted() {
        let mut log = EventLog::new();
        log.push(FetchEvent::TopAnimeFailed {
            message: "connection refused".into(),
        });
        log.push(FetchEvent::CoverFailed {
            url: "http://localhost:8000/x.jpg".into(),
            message: "404".into(),
        });
        log.push(FetchEvent::RecommendationsDiscarded { ticket: 1 });
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut log = EventLog::new();
        for ticket in 0..(EVENT_LOG_CAPACITY as u64 + 5) {
            log.push(FetchEvent::RecommendationsDiscarded { ticket });
        }
        assert_eq!(log.entries.len(), EVENT_LOG_CAPACITY);

        match log.entries.front() {
            Some((_, FetchEvent::RecommendationsDiscarded { ticket })) => assert_eq!(*ticket, 5),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
