//! Environment source: DEFPATCH__PATCH__WORKING_DIR=..., DEFPATCH__LOGGING__LEVEL=...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "DEFPATCH";

/// Add `DEFPATCH__*` environment overrides. `__` separates nested keys, so the
/// single-underscore `DEFPATCH_LOG*` variables read by logging are not picked up.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__"),
    )
}
