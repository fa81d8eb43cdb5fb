//! Example of a process-wide configuration loaded once

use envbind::{EnvBind, Global};
use std::thread;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[bind(env = "WORKERS", default = "4")]
    pub workers: usize,
}

static CONFIG: Global<Config> = Global::new();

fn config() -> anyhow::Result<&'static Config> {
    Ok(CONFIG.get_or_try_init(Config::from_env)?)
}

fn main() -> anyhow::Result<()> {
    let handles: Vec<_> = (0..4)
        .map(|i| thread::spawn(move || config().map(|c| (i, c.workers))))
        .collect();

    for handle in handles {
        let (thread, workers) = handle.join().expect("worker thread panicked")?;
        println!("thread {thread} sees {workers} workers");
    }

    Ok(())
}
