//! Check command - render every page without writing output

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use nodecms_generator::Builder;
use nodecms_render::{ERROR_CLASS, SyntaxHighlighter};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads and renders every content file. File-level failures are errors;
/// inline render errors inside a page are warnings.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match super::load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e:#}");
            bail!("Validation failed: {e:#}");
        }
    };

    let output = config.output_dir();
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            output.display()
        ));
    }

    if let Some(source) = &config.build.stylesheet_source
        && !Path::new(source).is_file()
    {
        result.add_error(format!("Stylesheet source not found: {source}"));
    }

    let theme = &config.build.syntax_theme;
    if !SyntaxHighlighter::available_themes().contains(&theme.as_str()) {
        result.add_warning(format!("Unknown syntax theme '{theme}', using the default"));
    }

    println!("\nChecking content files...");
    let builder = Builder::from_config(config);
    validate_content_files(&builder, &mut result);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Render every discovered file, recording failures and inline errors.
fn validate_content_files(builder: &Builder, result: &mut ValidationResult) {
    let files = match builder.discover() {
        Ok((files, errors)) => {
            for e in errors {
                println!("  ✗ {e}");
                result.add_error(e.to_string());
            }
            files
        }
        Err(e) => {
            println!("  ✗ {e}");
            result.add_error(e.to_string());
            return;
        }
    };

    if files.is_empty() {
        result.add_warning(format!(
            "No content files match '{}' in {}",
            builder.config().content.pattern,
            builder.base_dir().display()
        ));
        return;
    }

    let mut failed = 0;
    for path in &files {
        match builder.render_file(path) {
            Ok(html) => {
                let inline = html.matches(ERROR_CLASS).count();
                if inline > 0 {
                    result.add_warning(format!(
                        "{}: {inline} component(s) failed to render",
                        path.display()
                    ));
                }
            }
            Err(e) => {
                failed += 1;
                result.add_error(e.to_string());
            }
        }
    }

    let checked = files.len();
    if failed == 0 {
        println!("  ✓ All {checked} content files valid");
    } else {
        println!("  ✗ {failed}/{checked} content files have errors");
    }
}
