use anyhow::Result;
use leadgate_config::AppConfig;
use leadgate_store::{DatasetStore, DecisionLog};
use serde::Serialize;
use std::io::{self, Write};

pub mod check;
pub mod completions;
pub mod dataset;
pub mod env_check;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub store: &'a DatasetStore,
    pub log: &'a DecisionLog,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
