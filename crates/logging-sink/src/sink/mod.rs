//! crates/logging-sink/src/sink/mod.rs
//! The sink capability and its shared-ownership forwarding impls.

use std::sync::Arc;

use crate::error::SinkError;
use crate::record::Record;

mod line_sink;

pub use line_sink::LineSink;

/// Destination for records that passed the severity gate.
///
/// Implementations must be shareable across threads because a single sink
/// usually backs the process-wide logger. A call blocks until the record is
/// recorded or the sink fails.
pub trait LogSink: Send + Sync {
    /// Records `record` and returns the number of bytes the sink wrote.
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError>;

    /// Reports whether the backend would accept a record with `priority` and
    /// `tag`.
    ///
    /// This is a pass-through to the backend's own policy and is never
    /// consulted by the severity gate. The default accepts everything.
    fn is_loggable(&self, priority: i32, tag: Option<&str>) -> bool {
        let _ = (priority, tag);
        true
    }
}

impl<S> LogSink for &S
where
    S: LogSink + ?Sized,
{
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        (**self).write(record)
    }

    fn is_loggable(&self, priority: i32, tag: Option<&str>) -> bool {
        (**self).is_loggable(priority, tag)
    }
}

impl<S> LogSink for Box<S>
where
    S: LogSink + ?Sized,
{
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        (**self).write(record)
    }

    fn is_loggable(&self, priority: i32, tag: Option<&str>) -> bool {
        (**self).is_loggable(priority, tag)
    }
}

impl<S> LogSink for Arc<S>
where
    S: LogSink + ?Sized,
{
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        (**self).write(record)
    }

    fn is_loggable(&self, priority: i32, tag: Option<&str>) -> bool {
        (**self).is_loggable(priority, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority;

    struct Fixed(usize);

    impl LogSink for Fixed {
        fn write(&self, _record: &Record<'_>) -> Result<usize, SinkError> {
            Ok(self.0)
        }

        fn is_loggable(&self, priority: i32, _tag: Option<&str>) -> bool {
            priority >= priority::WARN
        }
    }

    #[test]
    fn boxed_and_shared_sinks_forward() {
        let record = Record::new(priority::INFO, None, "m");
        let boxed: Box<dyn LogSink> = Box::new(Fixed(3));
        let shared = Arc::new(Fixed(5));

        assert_eq!(boxed.write(&record).unwrap(), 3);
        assert_eq!(shared.write(&record).unwrap(), 5);
        let fixed = Fixed(7);
        let by_ref: &dyn LogSink = &&fixed;
        assert_eq!(by_ref.write(&record).unwrap(), 7);
    }

    #[test]
    fn is_loggable_forwards_through_wrappers() {
        let boxed: Box<dyn LogSink> = Box::new(Fixed(0));
        assert!(!boxed.is_loggable(priority::INFO, Some("t")));
        assert!(Arc::new(Fixed(0)).is_loggable(priority::ERROR, None));
    }

    #[test]
    fn default_is_loggable_accepts_everything() {
        struct Quiet;
        impl LogSink for Quiet {
            fn write(&self, _record: &Record<'_>) -> Result<usize, SinkError> {
                Ok(0)
            }
        }
        assert!(Quiet.is_loggable(0, None));
        assert!(Quiet.is_loggable(priority::ASSERT, Some("any")));
    }
}
