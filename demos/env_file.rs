//! Example loading a .env file overlaid by the process environment

use envbind::EnvBind;
use std::io::Write;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[bind(env = "DATABASE_URL", required = "true")]
    pub database_url: String,

    #[bind(env = "MAX_CONNECTIONS", default = "10")]
    pub max_connections: u32,
}

fn main() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "# local development settings")?;
    writeln!(file, "DATABASE_URL=postgres://localhost/dev")?;
    writeln!(file, "MAX_CONNECTIONS=5")?;

    // Process variables win over file entries
    std::env::set_var("MAX_CONNECTIONS", "20");

    let config = Config::load(file.path())?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max connections: {}", config.max_connections);

    Ok(())
}
