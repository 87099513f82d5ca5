pub mod debug_logger;
pub mod status;

pub use debug_logger::{get_debug_logger, init_logger, new_correlation_id, EnhancedDebugLogger, LoggerOptions};
