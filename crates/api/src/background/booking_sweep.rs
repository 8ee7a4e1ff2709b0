//! Completion sweep for approved bookings.
//!
//! Approved bookings whose end time has passed are promoted to `completed`.
//! [`sweep_expired`] is called before the dashboard and the staff listings
//! are read; [`run`] repeats it on a timer so the state converges even when
//! nobody is reading.

use std::time::Duration;

use chrono::Utc;
use roombook_db::repositories::BookingRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Promote every expired approved booking. Returns the number promoted.
pub async fn sweep_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let completed = BookingRepo::complete_expired(pool, Utc::now()).await?;
    if completed > 0 {
        tracing::info!(completed, "Booking sweep: marked bookings completed");
    } else {
        tracing::debug!("Booking sweep: nothing to complete");
    }
    Ok(completed)
}

/// Run the sweep every `interval` until `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Booking sweep job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Booking sweep job stopping");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = sweep_expired(&pool).await {
                    tracing::error!(error = %e, "Booking sweep: update failed");
                }
            }
        }
    }
}
