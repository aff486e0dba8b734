use crate::commands::{print_json, Context};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvReport {
    dataset_path: String,
    dataset_format: &'static str,
    block_across_any_offer: bool,
    recent_throttle_minutes: u32,
    log_path: Option<String>,
    min_phone_digits: usize,
}

pub fn env_check(ctx: &Context<'_>) -> Result<()> {
    let config = ctx.config;
    let report = EnvReport {
        dataset_path: config.dataset.path.display().to_string(),
        dataset_format: config.dataset.format.as_str(),
        block_across_any_offer: config.rules.block_across_any_offer,
        recent_throttle_minutes: config.rules.recent_throttle_minutes,
        log_path: config
            .log_path
            .as_ref()
            .map(|path| path.display().to_string()),
        min_phone_digits: config.min_phone_digits,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("dataset_path = {}", report.dataset_path);
    println!("dataset_format = {}", report.dataset_format);
    println!("block_across_any_offer = {}", report.block_across_any_offer);
    println!("recent_throttle_minutes = {}", report.recent_throttle_minutes);
    println!(
        "log_path = {}",
        report.log_path.as_deref().unwrap_or("(log output)")
    );
    println!("min_phone_digits = {}", report.min_phone_digits);
    Ok(())
}
