pub const APP_NAME: &str = "ValueDeck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_REV: Option<&str> = option_env!("BUILD_REV");

/// Version string for log lines and release banners.
pub fn version_label() -> String {
    match BUILD_REV {
        Some(rev) => format!("v{APP_VERSION}+{rev}"),
        None => format!("v{APP_VERSION}"),
    }
}

/// User-Agent sent by the generation client.
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), version_label())
}
