use crate::domain::model::{ExtractionResult, LandingObject};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

pub const OBJECT_NAME_PREFIX: &str = "spotify_raw_";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Object key for a snapshot captured at `captured_at`.
///
/// Microsecond resolution: two captures inside the same microsecond share a
/// key and the later write replaces the earlier one.
pub fn landing_key(key_prefix: &str, captured_at: &DateTime<Utc>) -> String {
    format!(
        "{}{}{}.json",
        key_prefix,
        OBJECT_NAME_PREFIX,
        captured_at.format(TIMESTAMP_FORMAT)
    )
}

/// Writes `", "` and `": "` between elements, the layout downstream
/// consumers of the landing zone already parse.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_json_bytes(payload: &serde_json::Value) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, SpacedFormatter);
    payload.serialize(&mut serializer)?;
    Ok(body)
}

pub struct LandingWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> LandingWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stores the raw payload as one new object and returns its key.
    pub async fn land(
        &self,
        result: ExtractionResult,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<String> {
        let object = LandingObject {
            bucket: bucket.to_string(),
            key: landing_key(key_prefix, &result.captured_at),
            body: to_json_bytes(&result.payload)?,
        };

        tracing::info!(
            "💾 Landing {} bytes at {}/{}",
            object.body.len(),
            object.bucket,
            object.key
        );

        self.storage
            .write_object(&object.bucket, &object.key, &object.body)
            .await
            .map_err(|e| match e {
                e @ (EtlError::StorageWriteError { .. } | EtlError::TransientNetworkError(_)) => e,
                other => EtlError::StorageWriteError {
                    key: object.key.clone(),
                    message: other.to_string(),
                },
            })?;

        tracing::debug!("Object written successfully");
        Ok(object.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use regex::Regex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
        writes: Arc<Mutex<usize>>,
        fail_with: Option<Failure>,
    }

    #[derive(Clone)]
    enum Failure {
        Denied(String),
        Unreachable,
    }

    impl MockStorage {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(Failure::Denied(message.to_string())),
                ..Self::default()
            }
        }

        fn unreachable() -> Self {
            Self {
                fail_with: Some(Failure::Unreachable),
                ..Self::default()
            }
        }

        async fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
            let objects = self.objects.lock().await;
            objects.get(&(bucket.to_string(), key.to_string())).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
            match &self.fail_with {
                Some(Failure::Denied(message)) => {
                    return Err(EtlError::IoError(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        message.clone(),
                    )));
                }
                Some(Failure::Unreachable) => {
                    return Err(EtlError::TransientNetworkError(Box::new(io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        format!("connection refused writing {}/{}", bucket, key),
                    ))));
                }
                None => {}
            }
            *self.writes.lock().await += 1;
            let mut objects = self.objects.lock().await;
            objects.insert((bucket.to_string(), key.to_string()), data.to_vec());
            Ok(())
        }
    }

    fn result_at(payload: serde_json::Value, captured_at: DateTime<Utc>) -> ExtractionResult {
        ExtractionResult {
            payload,
            captured_at,
        }
    }

    #[test]
    fn test_landing_key_format() {
        let captured_at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            landing_key("raw_data/to_processed/", &captured_at),
            "raw_data/to_processed/spotify_raw_2024-03-09 07:05:01.000000.json"
        );
    }

    #[test]
    fn test_body_uses_spaced_separators_and_source_key_order() {
        let payload: serde_json::Value =
            serde_json::from_str(r#"{"items":[{"track":{"name":"Song A"}}],"href":"x","added":[1,2]}"#)
                .unwrap();
        let body = to_json_bytes(&payload).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"items": [{"track": {"name": "Song A"}}], "href": "x", "added": [1, 2]}"#
        );
    }

    #[tokio::test]
    async fn test_land_writes_one_object_that_round_trips() {
        let storage = MockStorage::default();
        let writer = LandingWriter::new(storage.clone());
        let payload = serde_json::json!({
            "items": [
                {"added_at": "2023-01-01T00:00:00Z", "track": {"name": "Ünïcode ✓", "popularity": 71}},
                {"track": null}
            ],
            "next": null,
            "total": 2
        });

        let key = writer
            .land(result_at(payload.clone(), Utc::now()), "test-bucket", "raw_data/to_processed/")
            .await
            .unwrap();

        let pattern = Regex::new(
            r"^raw_data/to_processed/spotify_raw_\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{6}\.json$",
        )
        .unwrap();
        assert!(pattern.is_match(&key), "unexpected key {}", key);
        assert_eq!(*storage.writes.lock().await, 1);

        let stored = storage.object("test-bucket", &key).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&stored).unwrap();
        assert_eq!(parsed, payload);
    }

    #[tokio::test]
    async fn test_distinct_captures_land_under_distinct_keys() {
        let storage = MockStorage::default();
        let writer = LandingWriter::new(storage.clone());
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let second = first + chrono::Duration::microseconds(1);

        let key_a = writer
            .land(result_at(serde_json::json!({"n": 1}), first), "test-bucket", "p/")
            .await
            .unwrap();
        let key_b = writer
            .land(result_at(serde_json::json!({"n": 2}), second), "test-bucket", "p/")
            .await
            .unwrap();

        assert_ne!(key_a, key_b);
        assert_eq!(storage.objects.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_same_microsecond_captures_collide_last_write_wins() {
        let storage = MockStorage::default();
        let writer = LandingWriter::new(storage.clone());
        let captured_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let key_a = writer
            .land(result_at(serde_json::json!({"n": 1}), captured_at), "test-bucket", "p/")
            .await
            .unwrap();
        let key_b = writer
            .land(result_at(serde_json::json!({"n": 2}), captured_at), "test-bucket", "p/")
            .await
            .unwrap();

        assert_eq!(key_a, key_b);
        assert_eq!(storage.objects.lock().await.len(), 1);
        let stored = storage.object("test-bucket", &key_b).await.unwrap();
        assert_eq!(stored, br#"{"n": 2}"#.to_vec());
    }

    #[tokio::test]
    async fn test_storage_failure_is_storage_write_error() {
        let writer = LandingWriter::new(MockStorage::failing("AccessDenied"));
        let captured_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let err = writer
            .land(result_at(serde_json::json!({}), captured_at), "test-bucket", "raw_data/")
            .await
            .unwrap_err();

        match err {
            EtlError::StorageWriteError { key, message } => {
                assert_eq!(key, "raw_data/spotify_raw_2024-01-01 12:00:00.000000.json");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("expected storage write error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_storage_stays_transient() {
        let storage = MockStorage::unreachable();
        let writer = LandingWriter::new(storage.clone());
        let captured_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let err = writer
            .land(result_at(serde_json::json!({}), captured_at), "test-bucket", "raw_data/")
            .await
            .unwrap_err();

        assert!(
            matches!(err, EtlError::TransientNetworkError(_)),
            "unexpected error {:?}",
            err
        );
        assert!(err.is_transient());
        assert!(storage.objects.lock().await.is_empty());
    }
}
