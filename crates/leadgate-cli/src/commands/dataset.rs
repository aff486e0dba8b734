use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use leadgate_core::domain::{normalize_phone, PublicRecord};
use leadgate_store::SubmissionSource;

#[derive(Debug, Subcommand)]
pub enum DatasetCommand {
    /// Print every loaded row (public fields only)
    Rows(RowsArgs),
    /// Show the latest prior submission for a phone
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct RowsArgs {
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(long)]
    pub telephone: String,
    /// Restrict to this offer (case-insensitive)
    #[arg(long)]
    pub offer_id: Option<String>,
}

pub fn list_rows(ctx: &Context<'_>, args: RowsArgs) -> Result<()> {
    let records = ctx.store.load_all()?;
    let limit = args.limit.unwrap_or(records.len());
    let rows: Vec<PublicRecord> = records
        .iter()
        .take(limit)
        .map(|record| record.to_public())
        .collect();

    if ctx.json {
        return print_json(&rows);
    }

    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

pub fn lookup(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    let phone = normalize_phone(&args.telephone);
    let found = match args.offer_id.as_deref() {
        Some(offer_id) => ctx.store.find_duplicate_same_offer(&phone, offer_id.trim())?,
        None => ctx.store.find_duplicate_any_offer(&phone)?,
    };
    let found = found.map(|record| record.to_public());

    if ctx.json {
        return print_json(&found);
    }

    match found {
        Some(row) => println!("{}", format_row(&row)),
        None => println!("no match"),
    }
    Ok(())
}

fn format_row(row: &PublicRecord) -> String {
    let created_at = row
        .created_at
        .map(|at| at.to_canonical())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  {}  {}",
        row.source_id, row.offer_id, row.telephone, created_at
    )
}
