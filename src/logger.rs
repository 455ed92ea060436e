// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Logger`] trait: where finished records go.

use crate::log_record::LogRecord;
use std::fmt::Debug;

/**
A destination for [LogRecord]s.

Records produced by [`emit`](crate::emit) already have their call site rendered into
the text, and also carry the resolved [CallerContext](crate::CallerContext) through
[`LogRecord::caller`].  A logger that wants structured output (for example to group by
file, or to show the function name) should read the context rather than parse the text.
Records built by hand may have no caller.
*/
pub trait Logger: Debug + Send + Sync {
    /**
    Submits the log record for logging.

    The record is complete: resolution has already happened on the caller's thread, so
    a logger that defers the write still reports the right call site.
    */
    fn finish_log_record(&self, record: LogRecord);

    /**
    Submits the log record for logging asynchronously.

    Loggers may choose to implement this as a simple wrapper around [Self::finish_log_record].
    */
    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 's>>;

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self);
}

/*
Boilerplate notes.

Clone makes no sense for a logger that owns an output.
PartialEq/Eq/Hash: unclear if we mean data equality or provenance, so no.
Default: loggers may need construction parameters.
Send/Sync: required so loggers can live in the global list.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;
    use std::sync::Mutex;

    /// Keeps `function` and `line` from each record instead of its text.
    #[derive(Debug, Default)]
    struct StructuredLogger {
        sites: Mutex<Vec<Option<(String, u32)>>>,
    }

    impl Logger for StructuredLogger {
        fn finish_log_record(&self, record: LogRecord) {
            let site = record
                .caller()
                .map(|c| (c.function().to_string(), c.line()));
            self.sites.lock().unwrap().push(site);
        }

        fn finish_log_record_async<'s>(
            &'s self,
            record: LogRecord,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 's>> {
            Box::pin(async move { self.finish_log_record(record) })
        }

        fn prepare_to_die(&self) {}
    }

    #[test]
    fn loggers_read_the_call_site_from_the_record() {
        let logger = StructuredLogger::default();
        let mut located = LogRecord::new(Level::Info);
        let context = crate::caller_context!();
        let line = line!() - 1;
        located.log_caller(context);
        located.log("located");
        logger.finish_log_record(located);

        let mut bare = LogRecord::new(Level::Info);
        bare.log("bare");
        logger.finish_log_record(bare);

        let sites = logger.sites.lock().unwrap().clone();
        assert_eq!(
            sites,
            vec![Some((module_path!().to_string(), line)), None]
        );
    }
}
