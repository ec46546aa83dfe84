//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every snipz operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (resolving a script name to a stable selector,
//!   picking the first category when none is given)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no prompting. Business rules belong in
//! `commands/*.rs` and the store.
//!
//! ## Generic Over StorageBackend
//!
//! `SnipzApi<B: StorageBackend>`:
//! - Production: `SnipzApi<FsBackend>`, opened with [`SnipzApi::open`]
//! - Testing: `SnipzApi<MemBackend>`
//!
//! ## Failed Saves
//!
//! A mutation whose save fails returns an `Io` error but keeps the change in
//! memory, so the UI can show an error and offer [`SnipzApi::retry_save`].

use crate::commands::{self, copy::CopyOutcome, settings::SettingsAction, CmdMessage, CmdResult};
use crate::error::{Result, SnipzError};
use crate::init::SnipzPaths;
use crate::model::{Catalog, Direction, ScriptDraft, ScriptSelector};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;
use crate::store::fs_backend::FsBackend;

pub struct SnipzApi<B: StorageBackend> {
    store: CatalogStore<B>,
    paths: SnipzPaths,
}

impl SnipzApi<FsBackend> {
    /// Open the catalog in `paths`, creating an empty one on first run.
    pub fn open(paths: SnipzPaths) -> Result<Self> {
        let store = CatalogStore::open_or_init(FsBackend::new(&paths.catalog_file))?;
        Ok(Self::new(store, paths))
    }
}

impl<B: StorageBackend> SnipzApi<B> {
    pub fn new(store: CatalogStore<B>, paths: SnipzPaths) -> Self {
        Self { store, paths }
    }

    pub fn create_category(&mut self, name: &str) -> Result<CmdResult> {
        commands::category::create(&mut self.store, name)
    }

    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> Result<CmdResult> {
        commands::category::rename(&mut self.store, old_name, new_name)
    }

    pub fn delete_category(&mut self, name: &str) -> Result<CmdResult> {
        commands::category::delete(&mut self.store, name)
    }

    pub fn move_category(&mut self, name: &str, direction: Direction) -> Result<CmdResult> {
        commands::category::move_category(&mut self.store, name, direction)
    }

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::category::list(&self.store)
    }

    pub fn create_script(&mut self, category: &str, draft: ScriptDraft) -> Result<CmdResult> {
        commands::script::create(&mut self.store, category, draft)
    }

    pub fn update_script(
        &mut self,
        category: &str,
        selector: &ScriptSelector,
        draft: ScriptDraft,
    ) -> Result<CmdResult> {
        commands::script::update(&mut self.store, category, selector, draft)
    }

    pub fn delete_script(&mut self, category: &str, selector: &ScriptSelector) -> Result<CmdResult> {
        commands::script::delete(&mut self.store, category, selector)
    }

    /// Swap the scripts at zero-based positions `from` and `to`.
    pub fn reorder_script(&mut self, category: &str, from: usize, to: usize) -> Result<CmdResult> {
        commands::script::reorder(&mut self.store, category, from, to)
    }

    /// Scripts of `category`, or of the first category when `None`.
    pub fn list_scripts(&self, category: Option<&str>) -> Result<CmdResult> {
        let name = match category {
            Some(name) => name,
            None => match self.store.catalog().categories().first() {
                Some(first) => first.name.as_str(),
                None => {
                    let mut result = CmdResult::default();
                    result.add_message(CmdMessage::info(
                        "No categories yet. Create one to get started.",
                    ));
                    return Ok(result);
                }
            },
        };
        commands::script::list(&self.store, name)
    }

    pub fn show_script(&self, category: &str, selector: &ScriptSelector) -> Result<CmdResult> {
        commands::script::show(&self.store, category, selector)
    }

    pub fn search(&self, category: Option<&str>, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, category, query)
    }

    pub fn copy_for_use(&self, category: &str, selector: &ScriptSelector) -> Result<CopyOutcome> {
        commands::copy::run(&self.store, category, selector)
    }

    pub fn settings(&self, action: SettingsAction) -> Result<CmdResult> {
        commands::settings::run(&self.paths.settings_file, action)
    }

    /// Resolve a unique script name into an id selector.
    pub fn select_by_name(&self, category: &str, name: &str) -> Result<ScriptSelector> {
        let cat = self
            .store
            .category(category)
            .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", category)))?;
        cat.scripts
            .iter()
            .find(|s| s.name == name)
            .map(|s| ScriptSelector::Id(s.id))
            .ok_or_else(|| {
                SnipzError::NotFound(format!(
                    "script \"{}\" in category \"{}\"",
                    name, category
                ))
            })
    }

    pub fn retry_save(&self) -> Result<()> {
        self.store.persist()
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn store(&self) -> &CatalogStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &SnipzPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::mem_backend::MemBackend;

    fn api() -> SnipzApi<MemBackend> {
        let store = CatalogStore::open_or_init(MemBackend::new()).unwrap();
        SnipzApi::new(store, SnipzPaths::new("/tmp/snipz-api-test"))
    }

    fn draft(name: &str, value: &str) -> ScriptDraft {
        ScriptDraft::new("Bash", name, value, "")
    }

    #[test]
    fn list_scripts_defaults_to_first_category() {
        let mut api = api();
        api.create_category("First").unwrap();
        api.create_category("Second").unwrap();
        api.create_script("First", draft("a", "1")).unwrap();

        let result = api.list_scripts(None).unwrap();
        assert_eq!(result.listed_scripts.len(), 1);
        assert_eq!(result.listed_scripts[0].category, "First");
    }

    #[test]
    fn list_scripts_on_empty_catalog_is_informational() {
        let api = api();
        let result = api.list_scripts(None).unwrap();
        assert!(result.listed_scripts.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn select_by_name_tracks_script_through_edits() {
        let mut api = api();
        api.create_category("C").unwrap();
        api.create_script("C", draft("a", "1")).unwrap();

        let selector = api.select_by_name("C", "a").unwrap();
        api.update_script("C", &selector, draft("b", "2")).unwrap();
        let shown = api.show_script("C", &selector).unwrap();
        assert_eq!(shown.listed_scripts[0].script.name, "b");

        assert_eq!(
            api.select_by_name("C", "a").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn failed_save_keeps_change_and_retry_persists() {
        let mut api = api();
        api.create_category("C").unwrap();
        api.store().backend().set_simulate_write_error(true);

        let err = api.create_script("C", draft("a", "1")).unwrap_err();
        assert!(err.is_persistence_failure());
        assert_eq!(api.catalog().script_count(), 1);

        api.store().backend().set_simulate_write_error(false);
        api.retry_save().unwrap();
        let document = api.store().backend().document().unwrap();
        assert!(document.contains("\"script_name\": \"a\""));
    }

    #[test]
    fn copy_dispatches_to_template_check() {
        let mut api = api();
        api.create_category("C").unwrap();
        api.create_script("C", draft("greet", "echo {{Name}}")).unwrap();
        let selector = api.select_by_name("C", "greet").unwrap();
        assert!(api.copy_for_use("C", &selector).unwrap().had_placeholders());
    }
}
