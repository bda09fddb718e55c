//! Show or change the default color scheme

use anyhow::Result;

use crate::preferences::{PreferenceStore, ThemePreference, ThemeState};
use crate::Folio;

/// Apply `action` (`toggle`, `light`, `dark`, or nothing to show) and
/// return the resulting preference
pub fn run(folio: &Folio, action: Option<&str>) -> Result<ThemePreference> {
    let store = folio.preference_store();
    apply(&store, action)
}

/// Same as [`run`] against any store
pub fn apply(store: &dyn PreferenceStore, action: Option<&str>) -> Result<ThemePreference> {
    let mut state = ThemeState::load(store)?;

    match action {
        None => return Ok(state.preference()),
        Some("toggle") => {
            state.toggle();
        }
        Some(name) => state.set(name.parse()?),
    }

    state.save(store)?;
    tracing::info!("Default theme set to {}", state.preference());
    Ok(state.preference())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_show_does_not_write() {
        let store = MemoryStore::default();
        assert_eq!(apply(&store, None).unwrap(), ThemePreference::Light);
        assert_eq!(store.get(ThemeState::KEY).unwrap(), None);
    }

    #[test]
    fn test_toggle_then_set() {
        let store = MemoryStore::default();
        assert_eq!(apply(&store, Some("toggle")).unwrap(), ThemePreference::Dark);
        assert_eq!(apply(&store, Some("toggle")).unwrap(), ThemePreference::Light);
        assert_eq!(apply(&store, Some("dark")).unwrap(), ThemePreference::Dark);
        assert_eq!(apply(&store, None).unwrap(), ThemePreference::Dark);
        assert!(apply(&store, Some("purple")).is_err());
    }

    #[test]
    fn test_persists_for_site() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        run(&folio, Some("dark")).unwrap();

        let reopened = Folio::new(dir.path()).unwrap();
        assert_eq!(run(&reopened, None).unwrap(), ThemePreference::Dark);
    }
}
