use error_stack::ResultExt;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Registry,
};

use crate::{app::AppError, config::log_config::LogConfig, prettyprint::prettyprint::PrettyFormatter};

/// Installs the global subscriber: pretty events on stderr and, when
/// configured, a plain copy in the log file.
pub fn init(config: &LogConfig) -> error_stack::Result<(), AppError> {
    let level = config
        .level
        .parse::<LevelFilter>()
        .change_context(AppError::Logging)
        .attach_printable_lazy(|| format!("Unknown log level '{}'", config.level))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &config.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(
                    std::fs::File::create(path)
                        .change_context(AppError::Logging)
                        .attach_printable_lazy(|| {
                            format!("Failed to create log file {}", path.display())
                        })?,
                )
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(Targets::new().with_target(env!("CARGO_CRATE_NAME"), level))
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()
        .change_context(AppError::Logging)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_is_rejected() {
        let config = LogConfig {
            level: "chatty".to_string(),
            file: None,
        };
        let error = init(&config).unwrap_err();
        assert_eq!(*error.current_context(), AppError::Logging);
    }
}
