use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `"seqdiff=debug"`) when the variable is unset.
pub fn init_logging(default_directive: &str) -> anyhow::Result<()> {
    if !try_init_logging(default_directive)? {
        anyhow::bail!("a global tracing subscriber is already installed");
    }
    Ok(())
}

/// Like [`init_logging`], but reports whether a global subscriber was
/// already installed instead of failing.
pub fn try_init_logging(default_directive: &str) -> anyhow::Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)?,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok();

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_reported_not_fatal() {
        try_init_logging("seqdiff=debug").unwrap();
        assert!(init_logging("seqdiff=debug").is_err());
        assert!(!try_init_logging("seqdiff=debug").unwrap());
    }
}
