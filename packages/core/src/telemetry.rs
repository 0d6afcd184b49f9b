//! Tracing setup for hosts embedding the shell

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `directives` (e.g. `"info"`,
/// `"pageshell_core=debug"`). Invalid directives fall back to `info`.
/// Returns false when a global subscriber was already installed.
pub fn init_tracing(directives: &str) -> bool {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_refused() {
        init_tracing("not a [valid filter");
        assert!(!init_tracing("pageshell_core=debug"));
    }
}
