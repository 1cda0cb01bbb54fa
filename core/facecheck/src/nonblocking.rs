use std::sync::Arc;
use std::time::Duration;

use crate::{FaceValidator, ValidationVerdict};

impl FaceValidator {
    /// Run [`FaceValidator::validate`] on tokio's blocking pool.
    ///
    /// Decoding and pixel analysis are CPU-bound, so they must not run on an
    /// async worker thread.
    pub async fn validate_async(self: Arc<Self>, data_url: String) -> ValidationVerdict {
        match tokio::task::spawn_blocking(move || self.validate(&data_url)).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::error!(error = %e, "face check task failed");
                ValidationVerdict::processing_failure()
            }
        }
    }

    /// Like [`FaceValidator::validate_async`], giving up after `limit`.
    ///
    /// The blocking task is not interrupted; its result is discarded.
    pub async fn validate_with_timeout(
        self: Arc<Self>,
        data_url: String,
        limit: Duration,
    ) -> ValidationVerdict {
        match tokio::time::timeout(limit, self.validate_async(data_url)).await {
            Ok(verdict) => verdict,
            Err(_) => {
                tracing::warn!(limit_ms = limit.as_millis() as u64, "face check timed out");
                ValidationVerdict::processing_failure()
            }
        }
    }
}

/// Async form of [`crate::validate_face_in_image`].
pub async fn validate_face_in_image_async(data_url: String) -> ValidationVerdict {
    Arc::new(FaceValidator::new()).validate_async(data_url).await
}

/// Async validation with the default configuration, bounded by `limit`.
pub async fn validate_with_timeout(data_url: String, limit: Duration) -> ValidationVerdict {
    Arc::new(FaceValidator::new())
        .validate_with_timeout(data_url, limit)
        .await
}
