//! daylog Logs - Leveled logging with daily rotating files
//!
//! ```no_run
//! use daylog_logs::{info, Level, Logger, SinkKind};
//!
//! let logger = Logger::new();
//! logger.set_level(Level::Info);
//! logger.set_retention_days(7);
//! logger.set_file("logs/server.log").expect("non-empty path");
//! logger.set_sink_kind(SinkKind::File);
//!
//! info!(logger, "listening on port {}", 8080);
//! logger.shutdown();
//! ```

mod clock;
mod format;
mod logger;
mod reader;
mod rotation;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use daylog_core::{Level, LogSettings, SinkKind};
pub use format::{render, LineBuffer};
pub use logger::{LogStatus, Logger};
pub use reader::{list_daily_files, DailyFile, LogReader};
pub use rotation::{daily_path, daily_path_for_date, RotatingFileSink};
pub use sink::{ConsoleSink, FnSink, Sink, SinkOptions, Stream};

// Declared last so these names stay out of the other modules' textual scope
mod macros;
