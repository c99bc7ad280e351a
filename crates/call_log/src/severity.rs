//! The severities call logs can be emitted at, and the mapping from a directive's [`Level`] onto
//! a [`Logger`].

use std::{collections::BTreeSet, fmt, str::FromStr};

use tracing::Level;

use crate::{CallLogError, backend::Logger};

/// Severities supported by the call logger, from least to most verbose.
///
/// Directives are declared with a [`Level`]; only the levels that have a [`Severity`]
/// counterpart can be logged at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational call logs.
    Info,

    /// Debug call logs. This is the default for every directive.
    Debug,

    /// The most verbose call logs.
    Trace,
}

impl Severity {
    /// All supported severities.
    pub const ALL: [Self; 3] = [Self::Info, Self::Debug, Self::Trace];

    /// The upper-case name of the severity, as used in configuration errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// The [`Level`] call logs of this severity are emitted at.
    pub const fn level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}

impl TryFrom<Level> for Severity {
    type Error = CallLogError;

    fn try_from(level: Level) -> Result<Self, Self::Error> {
        match level {
            Level::INFO => Ok(Self::Info),
            Level::DEBUG => Ok(Self::Debug),
            Level::TRACE => Ok(Self::Trace),
            unsupported => Err(no_such_severity(unsupported)),
        }
    }
}

impl FromStr for Severity {
    type Err = CallLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| no_such_severity(s))
    }
}

/// Builds the error reported for a severity the call logger does not know about.
///
/// The available severities are listed as a sorted set, so the message is stable.
fn no_such_severity(value: impl fmt::Display) -> CallLogError {
    let available = Severity::ALL
        .into_iter()
        .map(Severity::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ");

    CallLogError::Configuration(format!(
        "{value}: no such severity defined, available severities are: [{available}]"
    ))
}

/// Checks whether `logger` would emit a call log at `level`.
///
/// # Errors
///
/// Returns [`CallLogError::Configuration`] if `level` has no [`Severity`] counterpart.
pub fn is_active<L>(level: Level, logger: &L) -> Result<bool, CallLogError>
where
    L: Logger + ?Sized,
{
    let severity = Severity::try_from(level)?;
    Ok(logger.is_enabled(severity))
}

/// Emits `message` on `logger` at `level`.
///
/// # Errors
///
/// Returns [`CallLogError::Configuration`] if `level` has no [`Severity`] counterpart.
pub fn emit<L>(level: Level, logger: &L, message: &str) -> Result<(), CallLogError>
where
    L: Logger + ?Sized,
{
    let severity = Severity::try_from(level)?;
    logger.log(severity, message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct OnlyInfo {
        lines: RefCell<Vec<(Severity, String)>>,
    }

    impl Logger for OnlyInfo {
        fn is_enabled(&self, severity: Severity) -> bool {
            severity == Severity::Info
        }

        fn log(&self, severity: Severity, message: &str) {
            self.lines.borrow_mut().push((severity, message.to_owned()));
        }
    }

    fn assert_lists_available_severities(error: &CallLogError) {
        let message = error.to_string();
        for name in ["INFO", "DEBUG", "TRACE"] {
            assert!(
                message.contains(name),
                "`{message}` does not list the `{name}` severity"
            );
        }
    }

    #[test]
    fn parsing_an_unknown_severity_is_a_configuration_error() {
        let error = "WARN".parse::<Severity>().expect_err("WARN is not a severity");

        assert!(matches!(error, CallLogError::Configuration(_)));
        assert_lists_available_severities(&error);
        assert_eq!(
            error.to_string(),
            "Configuration error: WARN: no such severity defined, available severities are: \
             [DEBUG, INFO, TRACE]"
        );
    }

    #[test]
    fn parsing_known_severities_ignores_case() {
        assert_eq!("info".parse::<Severity>().ok(), Some(Severity::Info));
        assert_eq!(" DEBUG ".parse::<Severity>().ok(), Some(Severity::Debug));
        assert_eq!("Trace".parse::<Severity>().ok(), Some(Severity::Trace));
    }

    #[test]
    fn level_conversion_round_trips_for_supported_severities() {
        for severity in Severity::ALL {
            assert_eq!(Severity::try_from(Level::from(severity)).ok(), Some(severity));
        }
    }

    #[test]
    fn unsupported_levels_fail_both_checks() {
        let logger = OnlyInfo::default();

        for level in [Level::WARN, Level::ERROR] {
            let error = is_active(level, &logger).expect_err("level has no severity");
            assert_lists_available_severities(&error);

            let error = emit(level, &logger, "ignored").expect_err("level has no severity");
            assert_lists_available_severities(&error);
        }

        assert!(logger.lines.borrow().is_empty());
    }

    #[test]
    fn supported_levels_are_routed_to_the_logger() {
        let logger = OnlyInfo::default();

        assert!(is_active(Level::INFO, &logger).expect("INFO is supported"));
        assert!(!is_active(Level::DEBUG, &logger).expect("DEBUG is supported"));
        assert!(!is_active(Level::TRACE, &logger).expect("TRACE is supported"));

        emit(Level::TRACE, &logger, "add(a=1)").expect("TRACE is supported");
        assert_eq!(
            logger.lines.borrow().as_slice(),
            &[(Severity::Trace, "add(a=1)".to_owned())]
        );
    }
}
