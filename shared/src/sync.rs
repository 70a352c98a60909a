//! On-demand ingestion of recent bank emails.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::FinanceApi;
use crate::notify::Notification;
use crate::{ApiError, SyncResponse};

/// Lookback offered in the sync menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncWindow {
    Week,
    Month,
    Quarter,
    HalfYear,
}

impl SyncWindow {
    pub const ALL: [SyncWindow; 4] = [SyncWindow::Week, SyncWindow::Month, SyncWindow::Quarter, SyncWindow::HalfYear];

    pub fn days(&self) -> u32 {
        match self {
            SyncWindow::Week => 7,
            SyncWindow::Month => 30,
            SyncWindow::Quarter => 90,
            SyncWindow::HalfYear => 180,
        }
    }

    /// Maps a day count back onto the menu; anything unknown reads as the longest window
    pub fn from_days(days: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|window| window.days() == days)
            .unwrap_or(SyncWindow::HalfYear)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncWindow::Week => "7 days",
            SyncWindow::Month => "30 days",
            SyncWindow::Quarter => "3 months",
            SyncWindow::HalfYear => "6 months",
        }
    }

    /// "Last 30 days"
    pub fn menu_label(&self) -> String {
        format!("Last {}", self.label())
    }

    /// Rough cost of scanning the window, shown next to the menu entry
    pub fn cost_hint(&self) -> &'static str {
        match self {
            SyncWindow::Week => "quick",
            SyncWindow::Month => "~$0.05",
            SyncWindow::Quarter => "~$0.18",
            SyncWindow::HalfYear => "~$0.27",
        }
    }

    pub fn is_quick(&self) -> bool {
        *self == SyncWindow::Week
    }

    pub fn progress_message(&self) -> String {
        format!("Syncing last {}…", self.label())
    }
}

/// What the dashboard remembers after a successful sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub transactions_added: u32,
    pub window: SyncWindow,
}

impl SyncSummary {
    pub fn new(response: &SyncResponse, window: SyncWindow) -> Self {
        Self {
            transactions_added: response.transactions_added.unwrap_or(0),
            window,
        }
    }

    /// Text of the dismissible banner under the header
    pub fn banner(&self) -> String {
        match self.transactions_added {
            0 => format!("✓ Sync complete, no new transactions in the last {}", self.window.label()),
            n => format!(
                "✓ Found {} new transaction{} from the last {}",
                n,
                plural(n),
                self.window.label()
            ),
        }
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Toast raised when the sync request finishes
pub fn sync_notification(result: &Result<SyncResponse, ApiError>) -> Notification {
    match result {
        Ok(response) => match response.transactions_added.unwrap_or(0) {
            0 => Notification::success(
                response
                    .message
                    .clone()
                    .unwrap_or_else(|| "Sync complete · no new transactions".to_string()),
            ),
            n => Notification::success(format!("Sync complete · {} new transaction{}", n, plural(n))),
        },
        Err(_) => Notification::error("Sync failed"),
    }
}

/// At most one sync in flight per page. Clones share the flag, and it is
/// taken synchronously so back-to-back clicks cannot both start a sync.
#[derive(Debug, Clone, Default)]
pub struct SyncLock {
    held: Rc<Cell<bool>>,
}

impl SyncLock {
    /// `false` when a sync is already running
    pub fn try_acquire(&self) -> bool {
        !self.held.replace(true)
    }

    pub fn release(&self) {
        self.held.set(false);
    }
}

/// Ask the backend to rescan `window`
pub async fn run_sync<A: FinanceApi + ?Sized>(api: &A, window: SyncWindow) -> Result<SyncResponse, ApiError> {
    log::info!("starting sync over the last {} days", window.days());
    let result = api.sync(window.days()).await;
    match &result {
        Ok(response) => log::info!("sync finished, {} new", response.transactions_added.unwrap_or(0)),
        Err(e) => log::warn!("sync failed: {}", e),
    }
    result
}
