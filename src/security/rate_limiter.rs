//! Rate Limiter Module
//!
//! Fixed-window request limiter keyed by client id, with a bounded client table.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default upper bound on distinct clients tracked at once.
pub const DEFAULT_MAX_CLIENTS: usize = 10_000;

// == Rate Limit Decision ==
/// Outcome of checking one request against the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request admitted; `remaining` more fit in the current window
    Allowed { remaining: u32 },
    /// Request refused; the client may retry after `retry_after`
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

#[derive(Debug)]
struct ClientWindow {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct ClientTable {
    windows: HashMap<String, ClientWindow>,
    /// Last time expired windows were dropped
    last_pruned: Option<Instant>,
}

// == Rate Limiter ==
/// Per-client fixed-window limiter.
///
/// The client table never holds more than `max_clients` entries. When it is
/// full, expired windows are pruned at most once per window length; a new
/// client that still finds no room is refused until the next prune.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    max_clients: usize,
    clients: Mutex<ClientTable>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter admitting `max_requests` per client per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            max_clients: DEFAULT_MAX_CLIENTS,
            clients: Mutex::new(ClientTable::default()),
        }
    }

    /// Overrides the bound on tracked clients (minimum 1).
    pub fn with_max_clients(mut self, max_clients: usize) -> Self {
        self.max_clients = max_clients.max(1);
        self
    }

    // == Check ==
    /// Counts one request from `client_id` and decides whether to admit it.
    pub fn check(&self, client_id: &str) -> RateLimitDecision {
        self.check_at(client_id, Instant::now())
    }

    fn check_at(&self, client_id: &str, now: Instant) -> RateLimitDecision {
        let mut table = self.clients.lock();

        if !table.windows.contains_key(client_id) && table.windows.len() >= self.max_clients {
            if let Some(retry_after) = self.make_room(&mut table, now) {
                return RateLimitDecision::Limited { retry_after };
            }
        }

        let state = table
            .windows
            .entry(client_id.to_string())
            .or_insert(ClientWindow {
                started: now,
                count: 0,
            });

        if now.duration_since(state.started) >= self.window {
            state.started = now;
            state.count = 0;
        }

        if state.count < self.max_requests {
            state.count += 1;
            RateLimitDecision::Allowed {
                remaining: self.max_requests - state.count,
            }
        } else {
            let elapsed = now.duration_since(state.started);
            RateLimitDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            }
        }
    }

    /// Drops expired windows if a prune is due. Returns how long a new client
    /// must wait when the table is still full afterwards.
    fn make_room(&self, table: &mut ClientTable, now: Instant) -> Option<Duration> {
        let prune_due = table
            .last_pruned
            .map_or(true, |at| now.duration_since(at) >= self.window);

        if prune_due {
            let window = self.window;
            table
                .windows
                .retain(|_, w| now.duration_since(w.started) < window);
            table.last_pruned = Some(now);
        }

        if table.windows.len() < self.max_clients {
            return None;
        }

        let next_prune = table
            .last_pruned
            .map_or(Duration::ZERO, |at| self.window.saturating_sub(now.duration_since(at)));
        Some(next_prune)
    }

    /// Number of clients currently holding a window.
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().windows.len()
    }
}
