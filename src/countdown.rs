//! Sale countdown: start/end timestamps rendered as a days/hours/minutes/seconds breakdown.
use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountdownError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("sale ends before it starts")]
    EndBeforeStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalePhase {
    Upcoming,
    Running,
    Ended,
}

impl SalePhase {
    pub fn headline(&self) -> &'static str {
        match self {
            SalePhase::Upcoming => "Sale Starts In",
            SalePhase::Running => "Hurry up! Sale Ends In",
            SalePhase::Ended => "Sale Ended!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownView {
    pub phase: SalePhase,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownView {
    fn ended() -> Self {
        Self {
            phase: SalePhase::Ended,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    fn remaining(phase: SalePhase, millis: i64) -> Self {
        let millis = millis.max(0);
        Self {
            phase,
            days: millis / 86_400_000,
            hours: (millis % 86_400_000) / 3_600_000,
            minutes: (millis % 3_600_000) / 60_000,
            seconds: (millis % 60_000) / 1000,
        }
    }

    pub fn headline(&self) -> &'static str {
        self.phase.headline()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Countdown {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CountdownError> {
        if end < start {
            return Err(CountdownError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// Parse the `data-start` / `data-end` attribute values.
    pub fn parse(start: &str, end: &str) -> Result<Self, CountdownError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> CountdownView {
        if now < self.start {
            CountdownView::remaining(SalePhase::Upcoming, (self.start - now).num_milliseconds())
        } else if now <= self.end {
            CountdownView::remaining(SalePhase::Running, (self.end - now).num_milliseconds())
        } else {
            CountdownView::ended()
        }
    }
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CountdownError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(CountdownError::InvalidTimestamp(value.to_string()))
}

/// Recomputes the view every second and stops after the sale has ended.
pub struct CountdownTimer;

impl CountdownTimer {
    pub fn spawn(countdown: Countdown) -> (JoinHandle<()>, mpsc::UnboundedReceiver<CountdownView>) {
        Self::spawn_with_clock(countdown, Utc::now)
    }

    pub fn spawn_with_clock<F>(
        countdown: Countdown,
        clock: F,
    ) -> (JoinHandle<()>, mpsc::UnboundedReceiver<CountdownView>)
    where
        F: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            loop {
                ticker.tick().await;
                let view = countdown.view_at(clock());
                if tx.send(view).is_err() {
                    break;
                }
                if view.phase == SalePhase::Ended {
                    debug!("sale ended, stopping countdown");
                    break;
                }
            }
        });
        (task, rx)
    }
}
