//! Console logging: `info` by default, overridable with `RUST_LOG`, written to stdout.

pub fn builder() -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.target(env_logger::Target::Stdout);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_installs_stdout_logger() {
        assert!(builder().is_test(true).try_init().is_ok());
        log::info!("logger up");
        assert!(log::log_enabled!(log::Level::Info) || std::env::var_os("RUST_LOG").is_some());
    }
}
