//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG;

const DEFAULT_CONFIG: &str = r#"# egret-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/bin-debug/**",
    "**/bin-release/**",
    "**/libs/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rules take no options; they can only be switched off.
[rules.ts-egret]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(PROJECT_CONFIG), force)?;

    println!("Created {PROJECT_CONFIG}");
    println!("\nNext steps:");
    println!("  1. Edit {PROJECT_CONFIG} to adjust excludes");
    println!("  2. Run: egret-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egret_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn starter_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("ts-egret"));
        assert!(config
            .analyzer
            .exclude
            .contains(&"**/node_modules/**".to_string()));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG);
        std::fs::write(&path, "# mine\n").unwrap();

        let err = write_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
