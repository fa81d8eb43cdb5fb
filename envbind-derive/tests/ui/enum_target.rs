// EnvBind targets must be structs with named fields

use envbind::EnvBind;

#[derive(EnvBind)]
enum Mode {
    Dev,
    Prod,
}

fn main() {}
