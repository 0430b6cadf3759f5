//! Format command implementation

use anyhow::Result;
use keyword_formatter::config::Config;
use keyword_formatter::format_title;
use log::debug;

pub fn format_command(config: &Config, title: &str) -> Result<()> {
    let inputs = config.process()?;
    let formatted = format_title(title, &inputs.rule, inputs.prefix.as_deref())?;
    debug!("Changed: {}", formatted != title);

    println!("{}", formatted);
    Ok(())
}
