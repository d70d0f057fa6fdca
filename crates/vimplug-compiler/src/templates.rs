//! Fixed vimscript text for the generated files
//!
//! The header and footer texts are bundled with the binary; only the
//! plugin install directory is substituted at generation time.

/// Keyword that declares a plugin in the startup script
pub const DIRECTIVE: &str = "Plug";

/// File name of the generated hotkey map inside the plugin directory
pub const HOTKEY_MAP_FILE: &str = "hotkeys.vim";

const PLUGIN_DIR_PLACEHOLDER: &str = "{plugin_dir}";

/// Get the startup script preamble, ending with `call plug#begin(...)`
pub fn startup_header(plugin_dir: &str) -> String {
    include_str!("templates/vimrc_header.vim").replace(PLUGIN_DIR_PLACEHOLDER, plugin_dir)
}

/// Get the text that follows the plugin declarations
pub fn startup_footer() -> &'static str {
    include_str!("templates/vimrc_footer.vim")
}

/// Get the plugin manager's own key bindings, which open every hotkey map
pub fn hotkey_header() -> &'static str {
    include_str!("templates/plug_hotkeys.vim")
}
