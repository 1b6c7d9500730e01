use std::{ffi::OsString, process::Command};

use tracing::info;

/// Starts the replacement process after patches were applied.
pub trait Relauncher: Send + Sync {
    fn relaunch(&self) -> std::io::Result<()>;
}

/// Spawns the running executable again with the same arguments. The caller
/// is expected to exit right after a successful relaunch.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentProcessRelauncher;

impl Relauncher for CurrentProcessRelauncher {
    fn relaunch(&self) -> std::io::Result<()> {
        let exe = std::env::current_exe()?;
        let args: Vec<OsString> = std::env::args_os().skip(1).collect();

        info!("Restarting {} {:?}", exe.display(), args);
        Command::new(&exe).args(&args).spawn()?;
        Ok(())
    }
}
