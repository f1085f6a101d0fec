use adcraft_infrastructure::{AdcraftPaths, ConfigService};
use anyhow::{Context, Result};

/// Writes a default `config.toml` (if missing) and a `secret.json` template.
pub fn run(paths: &AdcraftPaths) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() {
        println!("Config already exists: {}", config_file.display());
    } else {
        let service = ConfigService::new(paths);
        let config = service.load()?;
        service
            .save(&config)
            .with_context(|| format!("Failed to write {}", config_file.display()))?;
        println!("Wrote default config: {}", config_file.display());
    }

    let secret_file = paths
        .ensure_secret_file()
        .context("Failed to create secret.json")?;
    println!("Secrets file: {}", secret_file.display());
    println!("Add an API key for your provider, or set GEMINI_API_KEY / ANTHROPIC_API_KEY / OPENAI_API_KEY.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_files_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdcraftPaths::with_base(temp_dir.path());

        run(&paths).unwrap();
        assert!(paths.config_file().exists());
        assert!(paths.secret_file().exists());

        std::fs::write(paths.config_file(), "[library]\nquery_limit = 7\n").unwrap();
        run(&paths).unwrap();
        let config = ConfigService::new(&paths).load().unwrap();
        assert_eq!(config.library.query_limit, 7);
    }
}
