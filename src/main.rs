//! Vaxslots - Vaccination Slot Finder
//!
//! CoWIN 公開APIから接種可能な枠を検索

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use vaxslots::adapter::config::Config;
use vaxslots::driver::{Args, AvailabilityWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (defaults when the file is absent)
    let config = Config::load_or_default(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = AvailabilityWorkflow::new(config).await?;

    workflow.execute(args).await
}
