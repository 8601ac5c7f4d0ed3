//! Bulk invalidation of sessions whose address is no longer permitted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use ipgate_core::config::SessionConfig;
use ipgate_core::error::AppError;
use ipgate_core::traits::SessionStore;
use ipgate_core::types::{GateSettings, SessionRecord, UserId};

use crate::allowlist::AllowList;

/// Receives progress while a reap runs.
pub trait ReapProgress: Send + Sync {
    /// Called once with the number of sessions about to be examined.
    fn started(&self, _total: usize) {}

    /// Called after each session has been examined.
    fn advanced(&self, _processed: usize, _removed: u32) {}
}

impl ReapProgress for () {}

/// Summary of one reap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReapReport {
    /// Sessions inside the activity window.
    pub scanned: usize,
    /// Sessions removed by this run.
    pub removed: u32,
    /// Sessions kept because they belong to the acting operator.
    pub kept_own: u32,
    /// Sessions kept because their address is permitted.
    pub kept_permitted: u32,
    /// Sessions that disappeared before they could be removed.
    pub already_gone: u32,
    /// Sessions the store failed to remove; they stay active.
    pub failed: u32,
    /// The run stopped early on cancellation.
    pub cancelled: bool,
}

/// What to do with one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    KeepOwn,
    KeepPermitted,
    Remove,
}

/// Terminates sessions whose last-known address the allow-list rejects.
///
/// Triggered explicitly by an operator. Each removal is independent: a
/// failed removal is counted and the run carries on.
#[derive(Clone)]
pub struct SessionReaper {
    /// Session store for enumeration and removal.
    store: Arc<dyn SessionStore>,
    /// Sessions idle longer than this are left to the store's own expiry.
    session_timeout: chrono::Duration,
}

impl std::fmt::Debug for SessionReaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionReaper")
            .field("session_timeout", &self.session_timeout)
            .finish()
    }
}

impl SessionReaper {
    /// Creates a new session reaper.
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            session_timeout: config.timeout(),
        }
    }

    /// Start of the activity window ending at `now`.
    fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.session_timeout
    }

    /// Number of sessions active within the timeout window.
    pub async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        self.store
            .count_active_sessions(self.window_start(now))
            .await
    }

    /// Sessions a reap would remove right now, without removing them.
    pub async fn plan(
        &self,
        settings: &GateSettings,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, AppError> {
        let allow_list = AllowList::parse(&settings.valid_ips);
        let sessions = self
            .store
            .list_active_sessions(self.window_start(now))
            .await?;

        Ok(sessions
            .into_iter()
            .filter(|s| verdict(&allow_list, actor, s) == Verdict::Remove)
            .collect())
    }

    /// Runs a reap on behalf of `actor`.
    ///
    /// Sessions owned by `actor` are never removed. Returns an error only
    /// when the sessions cannot be listed at all.
    pub async fn reap(
        &self,
        settings: &GateSettings,
        actor: UserId,
        now: DateTime<Utc>,
        progress: &dyn ReapProgress,
        cancel: &CancellationToken,
    ) -> Result<ReapReport, AppError> {
        let allow_list = AllowList::parse(&settings.valid_ips);
        let sessions = self
            .store
            .list_active_sessions(self.window_start(now))
            .await?;

        info!(
            count = sessions.len(),
            actor = %actor,
            "Reaping sessions outside the allow-list"
        );

        let mut report = ReapReport {
            scanned: sessions.len(),
            ..ReapReport::default()
        };
        progress.started(sessions.len());

        for (idx, session) in sessions.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(processed = idx, "Session reap cancelled");
                report.cancelled = true;
                break;
            }

            match verdict(&allow_list, actor, session) {
                Verdict::KeepOwn => report.kept_own += 1,
                Verdict::KeepPermitted => report.kept_permitted += 1,
                Verdict::Remove => match self.store.remove_session(session.id).await {
                    Ok(true) => {
                        debug!(
                            session_id = %session.id,
                            user_id = %session.user_id,
                            ip = %session.ip_address,
                            "Removed session"
                        );
                        report.removed += 1;
                    }
                    Ok(false) => report.already_gone += 1,
                    Err(e) => {
                        error!(
                            session_id = %session.id,
                            error = %e,
                            "Failed to remove session"
                        );
                        report.failed += 1;
                    }
                },
            }

            progress.advanced(idx + 1, report.removed);
        }

        info!(
            removed = report.removed,
            failed = report.failed,
            cancelled = report.cancelled,
            "Session reap completed"
        );

        Ok(report)
    }
}

fn verdict(allow_list: &AllowList, actor: UserId, session: &SessionRecord) -> Verdict {
    if session.user_id == actor {
        Verdict::KeepOwn
    } else if allow_list.permits_text(&session.ip_address) {
        Verdict::KeepPermitted
    } else {
        Verdict::Remove
    }
}
