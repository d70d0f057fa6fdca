//! Code generation module
//!
//! Turns a decoded plugin list into the two generated vimscript files:
//! the startup script (`vimrc`) and the hotkey map (`hotkeys.vim`).
//! Both walk the plugin list in declaration order.

use std::fmt::Write as _;

use tracing::{debug, info};

use crate::error::Result;
use crate::manifest::{PluginEntry, PluginSpec};
use crate::templates::{self, DIRECTIVE, HOTKEY_MAP_FILE};

/// The generated text of both files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    pub startup_script: String,
    pub hotkey_map: String,
}

/// Vimscript generator
pub struct CodeGenerator {
    /// Directory the plugin manager installs plugins into; also holds the hotkey map
    plugin_dir: String,
    /// Output buffer
    output: String,
}

impl CodeGenerator {
    /// Create a new code generator
    ///
    /// `plugin_dir` is substituted into the generated text as-is.
    pub fn new(plugin_dir: impl Into<String>) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
            output: String::new(),
        }
    }

    /// Generate both files
    pub fn generate(&mut self, spec: &PluginSpec) -> Result<CompiledOutput> {
        let startup_script = self.generate_startup_script(spec)?;
        let hotkey_map = self.generate_hotkey_map(spec)?;

        Ok(CompiledOutput {
            startup_script,
            hotkey_map,
        })
    }

    /// Generate the startup script
    ///
    /// Every plugin gets exactly one declaration line, with or without a config.
    pub fn generate_startup_script(&mut self, spec: &PluginSpec) -> Result<String> {
        self.output.push_str(&templates::startup_header(&self.plugin_dir));

        for entry in spec.iter() {
            self.generate_declaration(entry)?;
        }

        self.output.push_str(templates::startup_footer());
        writeln!(self.output, "source {}/{}", self.plugin_dir, HOTKEY_MAP_FILE)?;

        Ok(std::mem::take(&mut self.output))
    }

    /// Generate the hotkey map
    ///
    /// Plugins without key bindings are skipped.
    pub fn generate_hotkey_map(&mut self, spec: &PluginSpec) -> Result<String> {
        self.output.push_str(templates::hotkey_header());

        for entry in spec.iter() {
            if entry.options.has_hotkeys() {
                self.generate_hotkey_block(entry)?;
                debug!("finished processing {}", entry.id);
            } else {
                info!("no hotkeys for {}", entry.id);
            }
        }

        Ok(std::mem::take(&mut self.output))
    }

    /// Generate a `Plug` line
    fn generate_declaration(&mut self, entry: &PluginEntry) -> Result<()> {
        write!(self.output, "{} '{}'", DIRECTIVE, entry.id)?;
        if let Some(config) = &entry.options.config {
            // Inserted unquoted; the caller supplies valid vimscript
            write!(self.output, ", {}", config)?;
        }
        self.output.push('\n');
        Ok(())
    }

    /// Generate the comment header and bindings for one plugin
    fn generate_hotkey_block(&mut self, entry: &PluginEntry) -> Result<()> {
        writeln!(self.output, "\" key map for plugin {}", entry.id)?;
        if let Some(hotkeys) = &entry.options.hotkeys {
            for (keys, action) in hotkeys.iter() {
                writeln!(self.output, "{} {}", keys, action)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    const PLUGIN_DIR: &str = "/home/me/vim/vp-plugins";

    fn compile(json: &str) -> CompiledOutput {
        let spec = PluginSpec::from_json_str(json).expect("invalid test input");
        CodeGenerator::new(PLUGIN_DIR).generate(&spec).expect("generation failed")
    }

    fn declarations(script: &str) -> Vec<&str> {
        script.lines().filter(|line| line.starts_with("Plug ")).collect()
    }

    #[test]
    fn test_declaration_with_config() {
        let out = compile(r#"{"foo/bar": {"config": "{'branch': 'main'}"}}"#);
        assert_eq!(declarations(&out.startup_script), vec!["Plug 'foo/bar', {'branch': 'main'}"]);
    }

    #[test]
    fn test_declaration_without_config() {
        let out = compile(r#"{"tpope/vim-sensible": {}}"#);
        assert_eq!(declarations(&out.startup_script), vec!["Plug 'tpope/vim-sensible'"]);
    }

    #[test]
    fn test_one_declaration_per_plugin_in_order() {
        let out = compile(r#"{"b/y": null, "a/x": {"config": "{'on': 'X'}"}, "c/z": {"hotkeys": {"k": "v"}}}"#);
        assert_eq!(
            declarations(&out.startup_script),
            vec!["Plug 'b/y'", "Plug 'a/x', {'on': 'X'}", "Plug 'c/z'"]
        );
    }

    #[test]
    fn test_declarations_sit_between_header_and_footer() {
        let out = compile(r#"{"a/x": {}}"#);
        let script = &out.startup_script;

        let begin = script.find("call plug#begin(").unwrap();
        let decl = script.find("Plug 'a/x'").unwrap();
        let end = script.find("call plug#end()").unwrap();
        assert!(begin < decl && decl < end);
    }

    #[test]
    fn test_startup_script_sources_hotkey_map_last() {
        let out = compile("{}");
        assert!(out.startup_script.contains(&format!("call plug#begin('{}')", PLUGIN_DIR)));
        assert!(
            out.startup_script
                .ends_with(&format!("source {}/hotkeys.vim\n", PLUGIN_DIR))
        );
    }

    #[test]
    fn test_empty_spec_emits_only_fixed_text() {
        let out = compile("{}");
        let expected_script = format!(
            "{}{}source {}/hotkeys.vim\n",
            templates::startup_header(PLUGIN_DIR),
            templates::startup_footer(),
            PLUGIN_DIR
        );
        assert_eq!(out.startup_script, expected_script);
        assert_eq!(out.hotkey_map, templates::hotkey_header());
    }

    #[test]
    fn test_hotkey_block() {
        let out = compile(r#"{"foo/bar": {"hotkeys": {"<C-f>": ":Find<CR>", "<leader>g": ":Grep<CR>"}}}"#);
        let body = out.hotkey_map.strip_prefix(templates::hotkey_header()).unwrap();
        assert_eq!(body, "\" key map for plugin foo/bar\n<C-f> :Find<CR>\n<leader>g :Grep<CR>\n");
    }

    #[test]
    fn test_plugins_without_hotkeys_have_no_block() {
        let out = compile(r#"{"a/x": {}, "b/y": {"hotkeys": {}}, "c/z": {"config": "{}"}}"#);
        assert_eq!(out.hotkey_map, templates::hotkey_header());
    }

    #[test]
    fn test_hotkey_blocks_follow_input_order() {
        let out = compile(r#"{"z/last": {"hotkeys": {"<F2>": ":Z<CR>"}}, "skip/me": {}, "a/first": {"hotkeys": {"<F1>": ":A<CR>"}}}"#);
        let z = out.hotkey_map.find("plugin z/last").unwrap();
        let a = out.hotkey_map.find("plugin a/first").unwrap();
        assert!(z < a);
        assert!(!out.hotkey_map.contains("skip/me"));
    }

    /// Collects formatted log output from a test subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_skipped_plugins_are_reported() {
        let spec = PluginSpec::from_json_str(r#"{"a/x": {}, "b/y": {"hotkeys": {}}, "c/z": {"hotkeys": {"k": "v"}}}"#)
            .unwrap();

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            CodeGenerator::new(PLUGIN_DIR).generate_hotkey_map(&spec).unwrap();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("no hotkeys for a/x"), "logs: {}", text);
        assert!(text.contains("no hotkeys for b/y"), "logs: {}", text);
        assert!(!text.contains("no hotkeys for c/z"), "logs: {}", text);
    }

    #[test]
    fn test_generator_is_reusable() {
        let spec = PluginSpec::from_json_str(r#"{"a/x": {"hotkeys": {"k": "v"}}}"#).unwrap();
        let mut generator = CodeGenerator::new(PLUGIN_DIR);
        let first = generator.generate(&spec).unwrap();
        let second = generator.generate(&spec).unwrap();
        assert_eq!(first, second);
    }
}
