//! Daily trigger for the broadcast job.
//!
//! The broadcast runs once a day at a fixed wall-clock time in an explicit UTC
//! offset (no dependency on the host's local timezone).

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::broadcast::BroadcastJob;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
    pub offset: FixedOffset,
}

impl DailySchedule {
    pub fn new(at: NaiveTime, offset: FixedOffset) -> Self {
        Self { at, offset }
    }

    /// First occurrence of `at` (in `offset`) strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let shift = chrono::Duration::seconds(i64::from(self.offset.local_minus_utc()));
        let mut next =
            DateTime::<Utc>::from_naive_utc_and_offset(local_date.and_time(self.at) - shift, Utc);
        while next <= now {
            next += chrono::Duration::days(1);
        }
        next
    }
}

#[derive(Clone)]
pub struct BroadcastScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    schedule: DailySchedule,
    job: Arc<BroadcastJob>,
    state: tokio::sync::Mutex<SchedulerState>,
}

#[derive(Default)]
struct SchedulerState {
    handle: Option<JoinHandle<()>>,
    cancel: Option<CancellationToken>,
}

impl BroadcastScheduler {
    pub fn new(schedule: DailySchedule, job: Arc<BroadcastJob>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                schedule,
                job,
                state: tokio::sync::Mutex::new(SchedulerState::default()),
            }),
        }
    }

    pub fn next_run(&self) -> DateTime<Utc> {
        self.inner.schedule.next_after(Utc::now())
    }

    /// Spawn the daily loop. No-op if it is already running.
    pub async fn start(&self) {
        let mut st = self.inner.state.lock().await;
        if st.handle.is_some() {
            return;
        }

        let cancel = CancellationToken::new();
        let scheduler = self.clone();
        let cancel_clone = cancel.clone();
        st.handle = Some(tokio::spawn(async move {
            scheduler.job_loop(cancel_clone).await;
        }));
        st.cancel = Some(cancel);

        tracing::info!(next_run = %self.next_run(), "daily broadcast scheduled");
    }

    /// Cancel the loop and wait for it to exit. An in-flight cycle is dropped
    /// at its next suspension point.
    pub async fn stop(&self) {
        let (cancel, handle) = {
            let mut st = self.inner.state.lock().await;
            (st.cancel.take(), st.handle.take())
        };

        if let Some(tok) = cancel {
            tok.cancel();
        }
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    async fn job_loop(&self, cancel: CancellationToken) {
        let mut last_run: Option<DateTime<Utc>> = None;
        loop {
            // Never fire twice for the same slot if the wall clock lags the timer.
            let after = match last_run {
                Some(prev) => Utc::now().max(prev),
                None => Utc::now(),
            };
            let next = self.inner.schedule.next_after(after);
            let dur = (next - Utc::now()).to_std().unwrap_or(Duration::from_secs(0));

            tokio::select! {
              _ = cancel.cancelled() => break,
              _ = sleep(dur) => {
                last_run = Some(next);
                tokio::select! {
                  _ = cancel.cancelled() => break,
                  res = self.inner.job.run_cycle() => match res {
                    Ok(report) => tracing::info!(attempted = report.attempted, "daily broadcast finished"),
                    Err(e) => tracing::error!(error = %e, "daily broadcast aborted"),
                  },
                }
              }
            }
        }
    }
}
