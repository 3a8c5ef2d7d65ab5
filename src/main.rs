//! Framebuffer test pattern tool.
//!
//! Opens `/dev/fb0`, maps it, draws one fixed pattern and restores the
//! original display mode on the way out.

use std::process::ExitCode;

use log::{error, info, warn};

use fbtest::{
    config::Config,
    devices::framebuffer::device::FramebufferDevice,
    error::FbError,
    patterns,
    runtime::{logging, signal, signal::CancelToken, timer},
};

fn main() -> ExitCode {
    logging::builder().init();

    let config = Config::default();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), FbError> {
    if let Err(e) = signal::install() {
        warn!("Cannot install signal handlers, Ctrl-C will skip mode restore: {}", e);
    }
    let cancel = CancelToken::from_signals();

    let mut device = FramebufferDevice::open(&config.device)?;
    device.save_mode()?;

    if let Some(depth) = config.requested_depth {
        if let Err(e) = device.set_depth(depth) {
            warn!("Error setting variable information: {}", e);
        }
    }

    let (geometry, finfo) = device.geometry()?;
    let mut mapping = device.map(finfo.smem_len as usize)?;

    patterns::render(&mut mapping, &geometry, config, &cancel)?;
    timer::hold(config.hold, &cancel);

    if cancel.is_cancelled() {
        warn!("Interrupted, restoring display mode");
    }
    info!("Releasing {}", device.path().display());
    Ok(())
}
