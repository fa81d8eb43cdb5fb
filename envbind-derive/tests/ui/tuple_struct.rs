// EnvBind targets must be structs with named fields

use envbind::EnvBind;

#[derive(EnvBind)]
struct Config(String, u16);

fn main() {}
