use adcraft_core::session::{SessionGate, UserIdentity};
use adcraft_infrastructure::{AdcraftPaths, LocalSessionGate};
use anyhow::{Context, Result, bail};

fn open_gate(paths: &AdcraftPaths) -> Result<LocalSessionGate> {
    LocalSessionGate::with_persistence(paths.session_file()).context("Failed to read session.toml")
}

pub fn sign_in(paths: &AdcraftPaths, user_id: String, name: Option<String>) -> Result<()> {
    let user_id = user_id.trim().to_string();
    if user_id.is_empty() {
        bail!("User id must not be empty");
    }

    let mut user = UserIdentity::new(user_id);
    if let Some(name) = name {
        user = user.with_display_name(name);
    }

    let gate = open_gate(paths)?;
    gate.sign_in(user.clone())?;
    println!("Signed in as {}", user.label());
    Ok(())
}

pub fn sign_out(paths: &AdcraftPaths) -> Result<()> {
    let gate = open_gate(paths)?;
    match gate.current() {
        Some(user) => {
            gate.sign_out()?;
            println!("Signed out {}", user.label());
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn whoami(paths: &AdcraftPaths) -> Result<()> {
    match open_gate(paths)?.current() {
        Some(user) if user.display_name.is_some() => println!("{} ({})", user.label(), user.id),
        Some(user) => println!("{}", user.id),
        None => println!("Not signed in"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sign_in_then_out() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdcraftPaths::with_base(temp_dir.path());

        sign_in(&paths, " jo ".to_string(), Some("Jo".to_string())).unwrap();
        let user = open_gate(&paths).unwrap().current().unwrap();
        assert_eq!(user.id, "jo");

        sign_out(&paths).unwrap();
        assert!(open_gate(&paths).unwrap().current().is_none());
    }

    #[test]
    fn test_blank_user_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdcraftPaths::with_base(temp_dir.path());
        assert!(sign_in(&paths, "  ".to_string(), None).is_err());
    }
}
