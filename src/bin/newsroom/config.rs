use std::env;
use std::path::{Path, PathBuf};

use newsroom::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];
    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Reads the explicit config file, or the first one found next to the
/// executable, in the current dir or in the user config dir. Without any of
/// them the built-in defaults are used.
pub(crate) fn open_config(cfg_path: Option<PathBuf>, root: &Path) -> Result<Config, String> {
    let config = match cfg_path.or_else(get_config_path) {
        Some(config_path) => {
            println!("Reading config from {}", config_path.display());
            read_config(&config_path).map_err(|e| e.to_string())?
        }
        None => {
            println!("No {} found. Using defaults", CFG_FILE_NAME);
            Config::default()
        }
    };

    println!("Site root is {}", root.display());
    let config = config.resolve_paths(root);

    match config.log {
        Some(ref log) => match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. Using stdout"),
        },
        None => println!("Log disabled. Using stdout"),
    }

    Ok(config)
}
