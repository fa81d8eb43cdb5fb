// Unknown field attributes are rejected

use envbind::EnvBind;

#[derive(EnvBind)]
struct Config {
    #[bind(env = "API_KEY", from_file)]
    api_key: String,
}

fn main() {}
