//! Engine options for glob compilation.

use serde::{Deserialize, Serialize};

/// Environment variable that turns extglob parsing off.
pub const DISABLE_EXTGLOB_ENV: &str = "LABEL_MATCHER_DISABLE_EXTGLOB";

/// Options that modify how glob patterns are compiled.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MatcherOptions {
    /// Parse `!() ?() +() *() @()` groups. When false, every pattern is a
    /// plain path glob and the operators are literal characters.
    #[serde(default = "default_extglob")]
    pub extglob: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self { extglob: true }
    }
}

fn default_extglob() -> bool {
    true
}

impl MatcherOptions {
    /// Read options from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_var(DISABLE_EXTGLOB_ENV)
    }

    fn from_env_var(name: &str) -> Self {
        Self::from_disable_flag(std::env::var(name).ok().as_deref())
    }

    /// Build options from the raw value of [`DISABLE_EXTGLOB_ENV`].
    pub fn from_disable_flag(value: Option<&str>) -> Self {
        let disabled = value
            .map(str::trim)
            .is_some_and(|v| ["1", "true", "yes"].iter().any(|t| v.eq_ignore_ascii_case(t)));
        Self { extglob: !disabled }
    }
}
