//! Syntax highlighting for code blocks.

use std::sync::LazyLock;

use syntect::{highlighting::ThemeSet, html::highlighted_html_for_string, parsing::SyntaxSet};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Default highlighting theme.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Syntax highlighter using syntect.
///
/// Syntax and theme definitions are loaded once per process; a highlighter
/// only carries the name of the theme it uses.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    theme: String,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the specified theme.
    pub fn new(theme: &str) -> Self {
        let mut highlighter = Self {
            theme: DEFAULT_THEME.to_string(),
        };
        highlighter.set_theme(theme);
        highlighter
    }

    /// Get available theme names.
    pub fn available_themes() -> Vec<&'static str> {
        THEME_SET.themes.keys().map(String::as_str).collect()
    }

    /// Name of the active theme.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Switch themes. Unknown names keep the current theme.
    pub fn set_theme(&mut self, theme: &str) {
        if THEME_SET.themes.contains_key(theme) {
            self.theme = theme.to_string();
        } else {
            tracing::warn!(theme, fallback = %self.theme, "Unknown syntax theme");
        }
    }

    /// Highlight code with the given language.
    ///
    /// If the language is not recognized, returns the code wrapped in a `<pre><code>` block.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang.and_then(|l| SYNTAX_SET.find_syntax_by_token(l));
        let theme = THEME_SET.themes.get(&self.theme);

        match (syntax, theme) {
            (Some(syntax), Some(theme)) => {
                highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
                    .unwrap_or_else(|_| fallback_highlight(code, lang))
            }
            _ => fallback_highlight(code, lang),
        }
    }
}

fn fallback_highlight(code: &str, lang: Option<&str>) -> String {
    let escaped = html_escape::encode_text(code);
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{escaped}</code></pre>",
            html_escape::encode_double_quoted_attribute(lang)
        ),
        None => format!("<pre><code>{escaped}</code></pre>"),
    }
}
