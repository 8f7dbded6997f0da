//! Theme preference persistence.
//!
//! One key, one string. Local persistence is authoritative for the client's
//! own future loads; the server mirror is handled elsewhere and never read
//! back.
//!
//! - Web: browser localStorage
//! - Desktop: a small file under the platform config directory

use dioxus::logger::tracing::warn;
use precis_core::config::THEME_STORAGE_KEY;
use precis_core::error::PrefsError;
use precis_core::theme::Theme;

/// Loads the persisted theme, defaulting to light when nothing valid is
/// stored. Never fails from the caller's perspective.
pub fn load_theme() -> Theme {
    match read_stored_theme() {
        Ok(Some(theme)) => theme,
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("failed to read theme preference: {}", e);
            Theme::default()
        }
    }
}

/// Persists the theme locally. Callers treat failure as log-only; the
/// in-memory value stays authoritative for the session either way.
pub fn save_theme_local(theme: Theme) -> Result<(), PrefsError> {
    write_stored_theme(theme)
}

#[cfg(target_arch = "wasm32")]
fn read_stored_theme() -> Result<Option<Theme>, PrefsError> {
    let storage = local_storage()?;
    let stored = storage
        .get_item(THEME_STORAGE_KEY)
        .map_err(|e| PrefsError::Read(format!("{:?}", e)))?;
    Ok(stored.as_deref().and_then(Theme::parse))
}

#[cfg(target_arch = "wasm32")]
fn write_stored_theme(theme: Theme) -> Result<(), PrefsError> {
    let storage = local_storage()?;
    storage
        .set_item(THEME_STORAGE_KEY, theme.as_str())
        .map_err(|e| PrefsError::Write(format!("{:?}", e)))
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PrefsError> {
    web_sys::window()
        .ok_or_else(|| PrefsError::Unavailable("no window object".to_string()))?
        .local_storage()
        .map_err(|e| PrefsError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| PrefsError::Unavailable("localStorage disabled".to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_stored_theme() -> Result<Option<Theme>, PrefsError> {
    let path = theme_file()?;
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Theme::parse(contents.trim())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PrefsError::Read(e.to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_stored_theme(theme: Theme) -> Result<(), PrefsError> {
    let path = theme_file()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PrefsError::Write(e.to_string()))?;
    }
    std::fs::write(&path, theme.as_str()).map_err(|e| PrefsError::Write(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn theme_file() -> Result<std::path::PathBuf, PrefsError> {
    use directories::ProjectDirs;

    let project_dirs = ProjectDirs::from("", "", "Precis")
        .ok_or_else(|| PrefsError::Unavailable("no config directory".to_string()))?;
    Ok(project_dirs.config_dir().join(THEME_STORAGE_KEY))
}
