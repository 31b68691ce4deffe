//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::auth::{authorize, Area, Role, SessionInfo, SessionStore};
use crate::cli::{error, format_role, info, print_session_table, success, warn, OutputFormat};
use crate::client::AuthClient;
use crate::config::{self, Config};
use crate::storage::FileStorage;

/// Initialize a new libris.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("libris.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created libris.toml");
    info("Run 'libris login' to start a session");

    Ok(())
}

/// Start a session
pub async fn login(
    config_path: Option<&Path>,
    token: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let config = config::load_config(config_path)?;
    let mut store = open_store(&config);

    let token = match token {
        Some(token) => token,
        None => {
            let email = match email {
                Some(email) => email,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Email")
                    .interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()?,
            };

            let client = AuthClient::new(&config.backend)?;
            match client.login(&email, &password).await {
                Ok(token) => token,
                Err(e) => {
                    error(&format!("Login failed: {}", e));
                    return Err(e.into());
                }
            }
        }
    };

    match store.login(&token) {
        Ok(session) => {
            success(&format!(
                "Logged in as {} ({})",
                session.subject,
                format_role(session.role)
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Backend issued an unusable token: {}", e));
            Err(e.into())
        }
    }
}

/// Create an account
pub async fn signup(
    config_path: Option<&Path>,
    email: &str,
    password: Option<String>,
    role: Role,
) -> Result<()> {
    let config = config::load_config(config_path)?;
    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let client = AuthClient::new(&config.backend)?;
    match client.signup(email, &password, role).await {
        Ok(()) => {
            success(&format!("Account created for {}", email));
            info("Run 'libris login' to start a session");
            Ok(())
        }
        Err(e) => {
            error(&format!("Signup failed: {}", e));
            Err(e.into())
        }
    }
}

/// End the current session
pub async fn logout(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config(config_path)?;
    let mut store = open_store(&config);

    let was_active = store.is_authenticated();
    store.logout()?;

    if was_active {
        success("Logged out");
    } else {
        info("No active session");
    }
    Ok(())
}

/// Show the current session
pub async fn whoami(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = config::load_config(config_path)?;
    let store = open_store(&config);

    let Some(session) = store.current() else {
        info("Not logged in. Run 'libris login' to start a session");
        return Ok(());
    };
    let session_info = SessionInfo::from(&session);

    match format {
        OutputFormat::Table => print_session_table(&session_info),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session_info)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&session_info)?),
    }

    Ok(())
}

/// Print the Authorization header value
pub async fn header(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config(config_path)?;
    let store = open_store(&config);

    let current = store.current();
    let session = authorize(current.as_ref(), Area::Member)?;
    println!("Authorization: {}", session.authorization_header());
    Ok(())
}

/// Check access to an area
pub async fn check(config_path: Option<&Path>, area: Area) -> Result<()> {
    let config = config::load_config(config_path)?;
    let store = open_store(&config);

    let current = store.current();
    match authorize(current.as_ref(), area) {
        Ok(session) => {
            success(&format!(
                "{} ({}) may enter the {:?} area",
                session.subject,
                format_role(session.role),
                area
            ));
            Ok(())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

/// Open the persisted session store and restore the previous session
fn open_store(config: &Config) -> SessionStore<FileStorage> {
    let storage = FileStorage::new(&config.session.storage_dir, &config.session.storage_key);
    let mut store = SessionStore::new(storage);
    store.restore();
    store
}
