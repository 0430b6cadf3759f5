//! Keywords command implementation

use anyhow::Result;
use colored::*;
use keyword_formatter::config::Config;
use keyword_formatter::KeywordRule;

pub fn show_keywords(config: &Config) -> Result<()> {
    let inputs = config.process()?;

    match &inputs.rule {
        KeywordRule::List(keywords) => {
            println!("{} ({})", "Keywords".bold(), keywords.len());
            for keyword in keywords {
                println!("  {}", keyword);
            }
        }
        KeywordRule::Pattern(pattern) => {
            println!("{} /{}/", "Pattern:".bold(), pattern.as_str());
        }
    }

    println!("{} {}", "Prefix:".bold(), inputs.prefix.as_deref().unwrap_or("none"));
    Ok(())
}
