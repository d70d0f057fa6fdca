//! Compiler driver: read the plugin list, decode it, generate the files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::CodeGenerator;
use crate::error::Result;
use crate::layout::OutputLayout;
use crate::manifest::PluginSpec;

/// Options for a single compiler run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// JSON plugin list
    pub input: PathBuf,
    /// Output root; plugin paths in the generated text are relative to the
    /// current directory when unset
    pub output_dir: Option<PathBuf>,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// Result of a successful compilation
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub source_file: PathBuf,
    pub plugin_count: usize,
    /// Contents of `dotvim/vimrc`
    pub startup_script: String,
    /// Contents of `vp-plugins/hotkeys.vim`
    pub hotkey_map: String,
}

pub struct Compiler {
    options: CompileOptions,
    layout: OutputLayout,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        let root = options.output_dir.clone().unwrap_or_default();
        Self {
            layout: OutputLayout::new(root),
            options,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Read and compile the configured input file
    pub fn compile(&self) -> Result<CompileOutput> {
        let input = &self.options.input;
        info!("Reading plugin list: {}", input.display());

        let spec = PluginSpec::from_path(input)?;
        self.compile_spec_from(input, &spec)
    }

    /// Compile an already decoded plugin list
    pub fn compile_spec(&self, spec: &PluginSpec) -> Result<CompileOutput> {
        self.compile_spec_from(&self.options.input, spec)
    }

    fn compile_spec_from(&self, source: &Path, spec: &PluginSpec) -> Result<CompileOutput> {
        debug!("Compiling {} plugins", spec.len());

        let plugin_dir = self.layout.plugin_dir.display().to_string();
        let output = CodeGenerator::new(plugin_dir).generate(spec)?;

        Ok(CompileOutput {
            source_file: source.to_path_buf(),
            plugin_count: spec.len(),
            startup_script: output.startup_script,
            hotkey_map: output.hotkey_map,
        })
    }
}
