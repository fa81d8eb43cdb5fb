//! Example demonstrating lists, maps, durations and error aggregation

use envbind::{EnvBind, SignedDuration};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Comma-separated, empty segments dropped
    #[bind(env = "TAGS")]
    pub tags: Vec<String>,

    // key:value entries
    #[bind(env = "LIMITS")]
    pub limits: HashMap<String, u32>,

    #[bind(env = "TIMEOUT", default = "30s")]
    pub timeout: Duration,

    // May be negative
    #[bind(env = "CLOCK_SKEW", default = "0")]
    pub clock_skew: SignedDuration,
}

fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_mapping(&mapping(&[
        ("TAGS", "web,,api"),
        ("LIMITS", "cpu:80,memory:512"),
        ("TIMEOUT", "1h30m"),
        ("CLOCK_SKEW", "-250ms"),
    ]))?;

    println!("Configuration loaded:");
    println!("  Tags: {:?}", config.tags);
    println!("  Limits: {:?}", config.limits);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Clock skew: {}", config.clock_skew);

    // Every problem is reported at once
    let broken = mapping(&[("LIMITS", "badentry"), ("TIMEOUT", "xyz")]);
    if let Err(errors) = Config::from_mapping(&broken) {
        println!("\n{errors}");
    }

    Ok(())
}
