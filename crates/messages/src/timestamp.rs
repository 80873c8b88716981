use std::time::{SystemTime, UNIX_EPOCH};

/// Point in time, seconds and nanoseconds since the Unix epoch.
///
/// Same layout as `google.protobuf.Timestamp`: `nanos` is always in
/// `0..1_000_000_000`, instants before the epoch carry negative `seconds`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,

    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

const NANOS_PER_SECOND: i32 = 1_000_000_000;

impl Timestamp {
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }
}

impl From<SystemTime> for Timestamp {
    #[allow(clippy::cast_possible_wrap)] // subsec_nanos() < 1e9 fits in i32
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Self {
                seconds: i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
                nanos: since.subsec_nanos() as i32,
            },
            Err(e) => {
                let before = e.duration();
                let mut seconds = -i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                let mut nanos = before.subsec_nanos() as i32;
                if nanos > 0 {
                    seconds -= 1;
                    nanos = NANOS_PER_SECOND - nanos;
                }
                Self { seconds, nanos }
            }
        }
    }
}
