use clap::Args as ClapArgs;
use miette::Result;

use crate::global::{self, Config};

#[derive(ClapArgs)]
pub struct Args {}

pub fn run(_args: Args, config: &Config) -> Result<()> {
    let path = global::config_path()?;

    println!("Config file:    {}", path.display());
    println!("Endpoint:       {}", config.backend.endpoint);
    println!("Model:          {}", config.backend.model);
    println!("Credential env: {}", config.backend.api_key_env);

    match std::env::var(&config.backend.api_key_env) {
        Ok(value) => println!("Credential:     set ({})", mask_value(&value)),
        Err(_) => println!("Credential:     not set"),
    }

    Ok(())
}

fn mask_value(value: &str) -> String {
    if value.len() <= 8 {
        "***".to_string()
    } else {
        let first = &value[..4];
        let last = &value[value.len() - 4..];
        format!("{first}...{last}")
    }
}
