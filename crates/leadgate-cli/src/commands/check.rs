use crate::commands::{print_json, Context};
use crate::error::CliError;
use anyhow::{Context as _, Result};
use clap::Args;
use leadgate_core::domain::SubmissionRequest;
use leadgate_core::rules::{RuleDecision, RuleEngine};
use leadgate_store::json::scalar_text;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long, conflicts_with = "request")]
    pub offer_id: Option<String>,
    #[arg(long, conflicts_with = "request")]
    pub telephone: Option<String>,
    /// JSON request body with `offerId` and `telephone`; `-` reads stdin
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,
}

pub fn check(ctx: &Context<'_>, args: CheckArgs) -> Result<()> {
    let request = match args.request {
        Some(path) => read_request(&path)?,
        None => SubmissionRequest::new(
            args.offer_id.unwrap_or_default(),
            args.telephone.unwrap_or_default(),
        ),
    };

    let submission = request.validate(ctx.config.min_phone_digits)?;
    let engine = RuleEngine::new(ctx.store, ctx.config.rules);
    let decision = engine.evaluate(&submission.offer_id, &submission.normalized_phone)?;
    debug!(
        offer = %submission.offer_id,
        blocked = decision.is_blocked(),
        "submission evaluated"
    );

    if let Err(err) = ctx
        .log
        .record(&submission.offer_id, &submission.normalized_phone, &decision)
    {
        warn!(error = %err, "failed to write decision log");
    }

    if ctx.json {
        return print_json(&decision.to_payload());
    }

    match &decision {
        RuleDecision::Allowed => println!("allowed"),
        RuleDecision::Blocked { reason, matched } => {
            let created_at = matched
                .created_at()
                .map(|at| at.to_canonical())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "blocked: {} (source {}, offer {}, created {})",
                reason.as_str(),
                matched.source_id(),
                matched.offer_id(),
                created_at
            );
        }
    }
    Ok(())
}

fn read_request(path: &Path) -> Result<SubmissionRequest> {
    let body = if path == Path::new("-") {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .with_context(|| "read request from stdin")?;
        body
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("read request file {}", path.display()))?
    };
    parse_request(&body)
}

fn parse_request(body: &str) -> Result<SubmissionRequest> {
    let value: Value = serde_json::from_str(body).map_err(|_| CliError::InvalidJson)?;
    let Value::Object(fields) = value else {
        return Err(CliError::InvalidJson.into());
    };
    let field = |key: &str| {
        fields
            .get(key)
            .and_then(scalar_text)
            .unwrap_or_default()
    };
    Ok(SubmissionRequest::new(field("offerId"), field("telephone")))
}
