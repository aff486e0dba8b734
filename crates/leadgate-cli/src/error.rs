use anyhow::Error;
use leadgate_config::ConfigError;
use leadgate_core::CoreError;
use leadgate_store::{StoreError, StoreErrorKind};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use tracing::debug;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("request body must be a JSON object")]
    InvalidJson,
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::InvalidJson => "invalid-json",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Short code and caller-safe detail for an error chain.
///
/// Store failures carry paths and parser output, so they only ever surface
/// their code.
pub fn error_payload(err: &Error) -> ErrorPayload {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ErrorPayload {
                error: cli_err.code(),
                details: Some(cli_err.to_string()),
            };
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ErrorPayload {
                error: core_err.code(),
                details: Some(core_err.to_string()),
            };
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ErrorPayload {
                error: store_err.code(),
                details: None,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ErrorPayload {
                error: "invalid-config",
                details: Some(format!("{:#}", err)),
            };
        }
    }
    ErrorPayload {
        error: "internal-error",
        details: None,
    }
}

pub fn report_error(err: &Error, verbose: bool) {
    let payload = error_payload(err);
    debug!(error = %format!("{:#}", err), "command failed");
    if verbose {
        eprintln!("error: {}: {:#}", payload.error, err);
        return;
    }
    match payload.details {
        Some(details) => eprintln!("error: {}: {}", payload.error, details),
        None => eprintln!("error: {}", payload.error),
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if cause.downcast_ref::<CliError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::DatasetUnavailable
        | StoreErrorKind::DatasetParseFailed
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir | ConfigError::CurrentDir(_) => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidEnv { .. }
        | ConfigError::InvalidField { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
