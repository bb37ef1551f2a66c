use anyhow::{Result, bail};

use sous_core::store::PersistentStore;

fn mode_name(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

/// Show the theme, or switch it when `dark` is given.
pub(crate) fn cmd_theme(store: &PersistentStore, dark: Option<bool>, json: bool) -> Result<()> {
    if let Some(enabled) = dark {
        if !store.set_dark_mode(enabled) {
            bail!("Could not save theme setting");
        }
    }

    let enabled = store.dark_mode();
    if json {
        println!("{}", serde_json::json!({ "enabled": enabled }));
    } else if dark.is_some() {
        println!("Theme set to {}", mode_name(enabled));
    } else {
        println!("Theme: {}", mode_name(enabled));
    }
    Ok(())
}
