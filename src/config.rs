/// Prompt written before each line when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// Runtime settings of a shell session. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    /// Print the welcome and goodbye banners.
    pub banners: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            banners: true,
        }
    }
}
