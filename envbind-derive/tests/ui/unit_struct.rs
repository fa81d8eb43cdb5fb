// EnvBind targets must be structs with named fields

use envbind::EnvBind;

#[derive(EnvBind)]
struct Marker;

fn main() {}
