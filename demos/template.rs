//! Example printing a .env template and the JSON descriptor of a config struct

use envbind::EnvBind;
use std::collections::HashMap;
use std::time::Duration;

// Fields are only described here, never read
#[allow(dead_code)]
#[derive(Debug, Default, EnvBind)]
struct Config {
    #[bind(env = "DATABASE_URL", required = "true")]
    pub database_url: String,

    #[bind(env = "TIMEOUT", default = "30s")]
    pub timeout: Duration,

    #[bind(env = "LIMITS", default = "cpu:80")]
    pub limits: HashMap<String, u32>,
}

fn main() -> anyhow::Result<()> {
    print!("{}", envbind::template::<Config>());
    println!();
    println!("{}", serde_json::to_string_pretty(Config::fields())?);

    Ok(())
}
