use clap::Parser;
use eplus_check::{check, options::CheckOptions, zone_table};

fn main() -> anyhow::Result<()> {
    let args = CheckOptions::parse();

    let level = args.verbosity.log_level_filter().as_str().to_lowercase();
    let _logger = flexi_logger::Logger::try_with_env_or_str(level)?.start()?;

    let registry = check(&args)?;
    println!("{}", zone_table(&registry));

    Ok(())
}
