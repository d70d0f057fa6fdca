//! Output directory layout
//!
//! ```text
//! <root>
//! <root>/dotvim            startup script (vimrc)
//! <root>/dotvim/autoload   plugin manager script (plug.vim)
//! <root>/vp-plugins        installed plugins and hotkeys.vim
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::driver::CompileOutput;
use crate::error::{CompileError, Result};
use crate::templates::HOTKEY_MAP_FILE;

const DOTVIM_DIR: &str = "dotvim";
const AUTOLOAD_DIR: &str = "autoload";
const PLUGIN_DIR: &str = "vp-plugins";
const STARTUP_SCRIPT_FILE: &str = "vimrc";

/// Where every generated file and directory lives under the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub dotvim_dir: PathBuf,
    pub autoload_dir: PathBuf,
    pub plugin_dir: PathBuf,
    pub startup_script_path: PathBuf,
    pub hotkey_map_path: PathBuf,
}

/// Paths written by [`OutputLayout::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub startup_script: PathBuf,
    pub hotkey_map: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let dotvim_dir = root.join(DOTVIM_DIR);
        let plugin_dir = root.join(PLUGIN_DIR);

        Self {
            autoload_dir: dotvim_dir.join(AUTOLOAD_DIR),
            startup_script_path: dotvim_dir.join(STARTUP_SCRIPT_FILE),
            hotkey_map_path: plugin_dir.join(HOTKEY_MAP_FILE),
            root,
            dotvim_dir,
            plugin_dir,
        }
    }

    /// Create the directories and write both generated files
    ///
    /// Existing directories are reused and existing files overwritten.
    /// The first failure aborts; anything already written stays on disk.
    pub fn write(&self, output: &CompileOutput) -> Result<WrittenFiles> {
        for dir in [&self.dotvim_dir, &self.autoload_dir, &self.plugin_dir] {
            create_dir(dir)?;
        }

        write_file(&self.startup_script_path, &output.startup_script)?;
        write_file(&self.hotkey_map_path, &output.hotkey_map)?;

        Ok(WrittenFiles {
            startup_script: self.startup_script_path.clone(),
            hotkey_map: self.hotkey_map_path.clone(),
        })
    }

    /// Human-readable summary of the layout
    pub fn describe(&self) -> String {
        [
            &self.root,
            &self.dotvim_dir,
            &self.autoload_dir,
            &self.plugin_dir,
            &self.startup_script_path,
            &self.hotkey_map_path,
        ]
        .iter()
        .map(|path| format!("  {}\n", path.display()))
        .collect()
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| CompileError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("Created directory: {}", dir.display());
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote: {}", path.display());
    Ok(())
}
