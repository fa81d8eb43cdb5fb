//! `.env` template rendering from a binding descriptor

use crate::descriptor::EnvBind;

/// Render a `.env` template listing every bound field of `T`.
///
/// Each key is preceded by a comment naming the field, its declared type and
/// whether it is required. Fields with a default are written as
/// `KEY=default`; the rest as `KEY=`.
///
/// ```rust
/// use envbind::EnvBind;
///
/// #[derive(Default, EnvBind)]
/// struct Config {
///     #[bind(env = "PORT", default = "3000")]
///     port: u16,
/// }
///
/// let template = envbind::template::<Config>();
/// assert!(template.contains("PORT=3000"));
/// ```
pub fn template<T: EnvBind>() -> String {
    T::fields()
        .iter()
        .map(|spec| {
            let requirement = if spec.required { "required" } else { "optional" };
            let mut entry = format!("# {} ({}, {})\n", spec.name, spec.type_name, requirement);
            if !spec.kind.is_supported() {
                entry.push_str("# unsupported type, this key is never bound\n");
            }
            entry.push_str(&format!("{}={}\n", spec.env_key, spec.default.unwrap_or_default()));
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}
