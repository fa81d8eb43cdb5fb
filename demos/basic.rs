//! Basic example: bind a struct from an in-memory mapping

use envbind::EnvBind;
use std::collections::HashMap;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[bind(env = "PORT", default = "3000")]
    pub port: i64,

    #[bind(env = "DEBUG")]
    pub debug: bool,

    #[bind(env = "APP_NAME", default = "DefaultApp")]
    pub name: String,
}

fn main() -> anyhow::Result<()> {
    let mapping = HashMap::from([
        ("PORT".to_string(), "8080".to_string()),
        ("DEBUG".to_string(), "true".to_string()),
    ]);

    let mut config = Config::default();
    envbind::bind(&mut config, &mapping)?;

    println!("Configuration loaded:");
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Name: {}", config.name);

    Ok(())
}
