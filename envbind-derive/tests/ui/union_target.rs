// EnvBind targets must be structs with named fields

use envbind::EnvBind;

#[derive(EnvBind)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
