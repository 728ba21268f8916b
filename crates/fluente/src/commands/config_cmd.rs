//! Configuration command handlers (no backend connection required).

use dialoguer::{Confirm, Input, Password};

use fluente_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Profiles => profiles(global),
        ConfigCommand::Use { name } => use_profile(&name, global),
        ConfigCommand::SetPassword { profile } => set_password(profile, global),
    }
}

/// Guided setup: create a profile and optionally store the password in the
/// system keyring.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = fluente_config::load_config_or_default();

    let prompt_err = |e: dialoguer::Error| CliError::Validation {
        field: "prompt".into(),
        reason: e.to_string(),
    };

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let server: String = Input::new()
        .with_prompt("Backend URL")
        .default("http://localhost:3000".into())
        .interact_text()
        .map_err(prompt_err)?;

    let email: String = Input::new()
        .with_prompt("Login email")
        .interact_text()
        .map_err(prompt_err)?;

    let store_in_keyring = Confirm::new()
        .with_prompt("Store the password in the system keyring?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        server,
        email: Some(email),
        password: None,
        password_env: None,
        timeout: None,
    };

    if store_in_keyring {
        let password = Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_err)?;
        fluente_config::store_password(&name, &password)?;
    } else {
        profile.password_env = Some("FLUENTE_PASSWORD".into());
        if !global.quiet {
            eprintln!("Set FLUENTE_PASSWORD in your environment before connecting.");
        }
    }

    config.default_profile = Some(name.clone());
    config.profiles.insert(name.clone(), profile);
    fluente_config::save_config(&config)?;

    if !global.quiet {
        eprintln!(
            "Profile '{name}' written to {}",
            fluente_config::config_path().display()
        );
    }
    Ok(())
}

/// Print the resolved configuration (passwords redacted).
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let config = fluente_config::load_config_or_default();
    let path = fluente_config::config_path();

    if global.quiet {
        return Ok(());
    }
    println!("Config file: {}", path.display());
    println!(
        "Default profile: {}",
        config.default_profile.as_deref().unwrap_or("(none)")
    );
    for (name, profile) in &config.profiles {
        println!("\n[{name}]");
        println!("  server:  {}", profile.server);
        println!("  email:   {}", profile.email.as_deref().unwrap_or("(unset)"));
        let password_source = if profile.password.is_some() {
            "plaintext in config"
        } else if profile.password_env.is_some() {
            "environment variable"
        } else {
            "keyring / FLUENTE_PASSWORD"
        };
        println!("  password: {password_source}");
        if let Some(timeout) = profile.timeout {
            println!("  timeout: {timeout}s");
        }
    }
    Ok(())
}

/// List profile names, marking the default.
fn profiles(global: &GlobalOpts) -> Result<(), CliError> {
    let config = fluente_config::load_config_or_default();
    if global.quiet {
        return Ok(());
    }
    if config.profiles.is_empty() {
        eprintln!("No profiles configured. Run: fluente config init");
        return Ok(());
    }
    let default = config.default_profile.as_deref();
    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();
    for name in names {
        let marker = if Some(name.as_str()) == default { "*" } else { " " };
        println!("{marker} {name}");
    }
    Ok(())
}

/// Switch the default profile.
fn use_profile(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = fluente_config::load_config_or_default();
    if !config.profiles.contains_key(name) {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: name.to_owned(),
            available: available.join(", "),
        });
    }
    config.default_profile = Some(name.to_owned());
    fluente_config::save_config(&config)?;
    if !global.quiet {
        eprintln!("Default profile set to '{name}'");
    }
    Ok(())
}

/// Store a password in the system keyring for a profile.
fn set_password(profile: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let config = fluente_config::load_config_or_default();
    let name = profile
        .or_else(|| global.profile.clone())
        .or(config.default_profile)
        .unwrap_or_else(|| "default".into());

    let password = Password::new()
        .with_prompt(format!("Password for profile '{name}'"))
        .interact()
        .map_err(|e| CliError::Validation {
            field: "password".into(),
            reason: e.to_string(),
        })?;

    fluente_config::store_password(&name, &password)?;
    if !global.quiet {
        eprintln!("Password stored in keyring for '{name}'");
    }
    Ok(())
}
