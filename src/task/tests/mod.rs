//! Unit tests for the task module.


use crate::task::ports::{KeyValueResult, KeyValueStore};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

mockall::mock! {
    /// Scriptable key-value store.
    pub Store {}

    impl KeyValueStore for Store {
        fn get_item(&self, key: &str) -> KeyValueResult<Option<String>>;
        fn set_item(&self, key: &str, value: &str) -> KeyValueResult<()>;
        fn remove_item(&self, key: &str) -> KeyValueResult<()>;
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-03-05T06:07:08.912Z.
    pub(super) fn sample() -> Self {
        let instant = Utc
            .with_ymd_and_hms(2024, 3, 5, 6, 7, 8)
            .single()
            .unwrap_or_default()
            + chrono::Duration::milliseconds(912);
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
