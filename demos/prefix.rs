//! Example demonstrating the struct-level prefix attribute

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
#[bind(prefix = "MYAPP_")]
struct Config {
    // Bound to MYAPP_HOST
    #[bind(env = "HOST", default = "127.0.0.1")]
    pub host: String,

    // Bound to MYAPP_PORT
    #[bind(env = "PORT", default = "8080")]
    pub port: u16,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_PORT", "9000");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);

    Ok(())
}
