use super::backend::StorageBackend;
use crate::error::{Result, SnipzError};
use crate::model::{Catalog, Category, Direction, Script, ScriptDraft, ScriptSelector};

/// The authoritative in-memory catalog, bound to the backend it persists to.
///
/// Every mutation follows the same three steps: validate, apply, save. A failed
/// save keeps the applied change and returns the persistence error; call
/// [`CatalogStore::persist`] to try again.
pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    catalog: Catalog,
}

impl<B: StorageBackend> CatalogStore<B> {
    /// Load the catalog. Fails with `NotFound` if the backend has no document.
    pub fn open(backend: B) -> Result<Self> {
        let catalog = backend.load()?;
        Ok(Self { backend, catalog })
    }

    /// Load the catalog, writing an empty document first if none exists.
    pub fn open_or_init(backend: B) -> Result<Self> {
        if !backend.exists() {
            backend.save(&Catalog::new())?;
            tracing::info!(path = %backend.location().display(), "initialized empty catalog");
        }
        Self::open(backend)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.catalog.get(name)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    pub fn script_count(&self) -> usize {
        self.catalog.script_count()
    }

    /// Write the whole current catalog to the backend.
    pub fn persist(&self) -> Result<()> {
        self.backend.save(&self.catalog).inspect_err(|e| {
            tracing::warn!(
                path = %self.backend.location().display(),
                error = %e,
                "catalog save failed; in-memory state kept"
            );
        })
    }

    // --- Categories ---

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        require_non_empty("Category name", name)?;
        if self.catalog.contains(name) {
            return Err(SnipzError::Validation(format!(
                "Category \"{}\" already exists",
                name
            )));
        }
        self.catalog.categories_mut().push(Category::new(name));
        self.persist()?;
        tracing::info!(category = name, "category added");
        Ok(())
    }

    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let position = self.require_category_position(old_name)?;
        require_non_empty("Category name", new_name)?;
        if old_name != new_name && self.catalog.contains(new_name) {
            return Err(SnipzError::Conflict(format!(
                "Category \"{}\" already exists",
                new_name
            )));
        }
        self.catalog.categories_mut()[position].name = new_name.to_string();
        self.persist()?;
        tracing::info!(category = old_name, new_name, "category renamed");
        Ok(())
    }

    /// Remove a category and every script in it. Returns what was removed.
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let position = self.require_category_position(name)?;
        let removed = self.catalog.categories_mut().remove(position);
        self.persist()?;
        tracing::info!(
            category = name,
            scripts = removed.scripts.len(),
            "category removed"
        );
        Ok(removed)
    }

    /// Swap a category with its neighbour. Returns `false` (and writes nothing)
    /// when it is already at that end.
    pub fn move_category(&mut self, name: &str, direction: Direction) -> Result<bool> {
        let position = self.require_category_position(name)?;
        let target = match direction {
            Direction::Up if position > 0 => position - 1,
            Direction::Down if position + 1 < self.catalog.len() => position + 1,
            _ => return Ok(false),
        };
        self.catalog.categories_mut().swap(position, target);
        self.persist()?;
        tracing::info!(category = name, %direction, "category moved");
        Ok(true)
    }

    // --- Scripts ---

    pub fn add_script(&mut self, category: &str, draft: ScriptDraft) -> Result<Script> {
        validate_draft(&draft)?;
        let cat = self.catalog.get_mut(category).ok_or_else(|| {
            SnipzError::Validation(format!("Category \"{}\" does not exist", category))
        })?;
        if cat.has_script_named(&draft.name) {
            return Err(SnipzError::Validation(format!(
                "A script named \"{}\" already exists in \"{}\"",
                draft.name, category
            )));
        }
        let script = Script::new(draft);
        cat.scripts.push(script.clone());
        self.persist()?;
        tracing::info!(category, script = %script.name, "script added");
        Ok(script)
    }

    /// Replace every field of the selected script. Id and position are kept.
    pub fn update_script(
        &mut self,
        category: &str,
        selector: &ScriptSelector,
        draft: ScriptDraft,
    ) -> Result<Script> {
        validate_draft(&draft)?;
        let cat = self.require_category_mut(category)?;
        let index = cat
            .position_of(selector)
            .ok_or_else(|| script_not_found(category, selector))?;
        let collides = cat
            .scripts
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.name == draft.name);
        if collides {
            return Err(SnipzError::Validation(format!(
                "A script named \"{}\" already exists in \"{}\"",
                draft.name, category
            )));
        }
        cat.scripts[index].apply(draft);
        let updated = cat.scripts[index].clone();
        self.persist()?;
        tracing::info!(category, script = %updated.name, "script updated");
        Ok(updated)
    }

    pub fn delete_script(&mut self, category: &str, selector: &ScriptSelector) -> Result<Script> {
        let cat = self.require_category_mut(category)?;
        let index = cat
            .position_of(selector)
            .ok_or_else(|| script_not_found(category, selector))?;
        let removed = cat.scripts.remove(index);
        self.persist()?;
        tracing::info!(category, script = %removed.name, "script deleted");
        Ok(removed)
    }

    /// Swap the scripts at two zero-based positions.
    pub fn reorder_script(&mut self, category: &str, from: usize, to: usize) -> Result<()> {
        let cat = self.require_category_mut(category)?;
        let len = cat.scripts.len();
        for index in [from, to] {
            if index >= len {
                return Err(SnipzError::OutOfRange { index, len });
            }
        }
        cat.scripts.swap(from, to);
        self.persist()?;
        tracing::info!(category, from, to, "scripts swapped");
        Ok(())
    }

    fn require_category_position(&self, name: &str) -> Result<usize> {
        self.catalog
            .position(name)
            .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", name)))
    }

    fn require_category_mut(&mut self, name: &str) -> Result<&mut Category> {
        self.catalog
            .get_mut(name)
            .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", name)))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SnipzError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_draft(draft: &ScriptDraft) -> Result<()> {
    require_non_empty("Script name", &draft.name)?;
    require_non_empty("Script value", &draft.value)
}

fn script_not_found(category: &str, selector: &ScriptSelector) -> SnipzError {
    SnipzError::NotFound(format!("script {} in category \"{}\"", selector, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::mem_backend::MemBackend;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(logs.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn store() -> CatalogStore<MemBackend> {
        CatalogStore::open_or_init(MemBackend::new()).unwrap()
    }

    fn draft(name: &str, value: &str) -> ScriptDraft {
        ScriptDraft::new("Bash", name, value, "")
    }

    fn names(store: &CatalogStore<MemBackend>, category: &str) -> Vec<String> {
        store
            .category(category)
            .unwrap()
            .scripts
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    #[test]
    fn open_without_document_is_not_found() {
        let err = CatalogStore::open(MemBackend::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn open_or_init_writes_empty_document() {
        let store = store();
        assert!(store.catalog().is_empty());
        assert_eq!(store.backend().document().as_deref(), Some("{}"));
    }

    #[test]
    fn add_category_appends_and_persists() {
        let mut store = store();
        store.add_category("Networking").unwrap();
        store.add_category("Scripting").unwrap();
        assert_eq!(store.category_names(), vec!["Networking", "Scripting"]);

        let reloaded = CatalogStore::open(MemBackend::with_document(
            store.backend().document().unwrap(),
        ))
        .unwrap();
        assert_eq!(reloaded.category_names(), vec!["Networking", "Scripting"]);
    }

    #[test]
    fn add_category_rejects_empty_and_duplicate() {
        let mut store = store();
        store.add_category("Networking").unwrap();

        let empty = store.add_category("").unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::Validation);

        let dup = store.add_category("Networking").unwrap_err();
        assert_eq!(dup.kind(), ErrorKind::Validation);

        // Case-sensitive: a different case is a different category
        store.add_category("networking").unwrap();
        assert_eq!(store.catalog().len(), 2);
    }

    #[test]
    fn rename_keeps_position_and_scripts() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_category("B").unwrap();
        store.add_category("C").unwrap();
        store.add_script("B", draft("one", "1")).unwrap();
        store.add_script("B", draft("two", "2")).unwrap();

        store.rename_category("B", "Bee").unwrap();
        assert_eq!(store.category_names(), vec!["A", "Bee", "C"]);
        assert_eq!(names(&store, "Bee"), vec!["one", "two"]);
    }

    #[test]
    fn rename_onto_existing_category_conflicts() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_category("B").unwrap();
        store.add_script("A", draft("one", "1")).unwrap();

        let err = store.rename_category("A", "B").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.category_names(), vec!["A", "B"]);
        assert_eq!(names(&store, "A"), vec!["one"]);
    }

    #[test]
    fn rename_validates_names() {
        let mut store = store();
        store.add_category("A").unwrap();
        assert_eq!(
            store.rename_category("A", "").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            store.rename_category("Missing", "X").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        store.rename_category("A", "A").unwrap();
    }

    #[test]
    fn remove_category_cascades_to_first_start_state() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_script("A", draft("one", "1")).unwrap();

        let removed = store.remove_category("A").unwrap();
        assert_eq!(removed.scripts.len(), 1);
        assert!(store.catalog().is_empty());
        assert_eq!(store.backend().document().as_deref(), Some("{}"));

        assert_eq!(
            store.remove_category("A").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn move_category_swaps_neighbours() {
        let mut store = store();
        for name in ["A", "B", "C"] {
            store.add_category(name).unwrap();
        }
        assert!(store.move_category("C", Direction::Up).unwrap());
        assert_eq!(store.category_names(), vec!["A", "C", "B"]);
        assert!(store.move_category("A", Direction::Down).unwrap());
        assert_eq!(store.category_names(), vec!["C", "A", "B"]);
    }

    #[test]
    fn move_category_at_boundaries_is_a_quiet_no_op() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_category("B").unwrap();
        let saves = store.backend().save_count();

        assert!(!store.move_category("A", Direction::Up).unwrap());
        assert!(!store.move_category("B", Direction::Down).unwrap());
        assert_eq!(store.category_names(), vec!["A", "B"]);
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn add_script_validates_fields_and_category() {
        let mut store = store();
        store.add_category("A").unwrap();

        for bad in [draft("", "x"), draft("x", "")] {
            assert_eq!(
                store.add_script("A", bad).unwrap_err().kind(),
                ErrorKind::Validation
            );
        }
        assert_eq!(
            store
                .add_script("Missing", draft("x", "y"))
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn script_names_are_unique_per_category_only() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_category("B").unwrap();
        store.add_script("A", draft("same", "1")).unwrap();
        store.add_script("B", draft("same", "1")).unwrap();

        let err = store.add_script("A", draft("same", "2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn update_script_by_match_replaces_all_fields() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_script("A", draft("one", "1")).unwrap();
        let original = store.add_script("A", draft("two", "2")).unwrap();

        let new_fields = ScriptDraft::new("Python", "deux", "print(2)", "prints two");
        let updated = store
            .update_script("A", &ScriptSelector::by_match("two", "2"), new_fields.clone())
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.draft(), new_fields);
        assert_eq!(names(&store, "A"), vec!["one", "deux"]);
    }

    #[test]
    fn update_script_by_id_survives_name_and_value_edits() {
        let mut store = store();
        store.add_category("A").unwrap();
        let script = store.add_script("A", draft("one", "1")).unwrap();
        let selector = ScriptSelector::Id(script.id);

        store.update_script("A", &selector, draft("uno", "I")).unwrap();
        store.update_script("A", &selector, draft("eins", "i")).unwrap();
        assert_eq!(names(&store, "A"), vec!["eins"]);
    }

    #[test]
    fn update_script_errors() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_script("A", draft("one", "1")).unwrap();
        store.add_script("A", draft("two", "2")).unwrap();

        let missing = store
            .update_script("A", &ScriptSelector::by_match("one", "wrong"), draft("x", "y"))
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let collision = store
            .update_script("A", &ScriptSelector::by_match("one", "1"), draft("two", "y"))
            .unwrap_err();
        assert_eq!(collision.kind(), ErrorKind::Validation);

        // Keeping its own name is fine
        store
            .update_script("A", &ScriptSelector::by_match("one", "1"), draft("one", "11"))
            .unwrap();
    }

    #[test]
    fn delete_script_preserves_order_of_the_rest() {
        let mut store = store();
        store.add_category("A").unwrap();
        for (n, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
            store.add_script("A", draft(n, v)).unwrap();
        }
        let removed = store
            .delete_script("A", &ScriptSelector::by_match("b", "2"))
            .unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&store, "A"), vec!["a", "c"]);

        let err = store
            .delete_script("A", &ScriptSelector::by_match("b", "2"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn reorder_swaps_pairwise() {
        let mut store = store();
        store.add_category("A").unwrap();
        for (n, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
            store.add_script("A", draft(n, v)).unwrap();
        }
        store.reorder_script("A", 0, 2).unwrap();
        assert_eq!(names(&store, "A"), vec!["c", "b", "a"]);

        store.reorder_script("A", 1, 1).unwrap();
        assert_eq!(names(&store, "A"), vec!["c", "b", "a"]);
    }

    #[test]
    fn reorder_rejects_bad_positions() {
        let mut store = store();
        store.add_category("A").unwrap();
        store.add_script("A", draft("a", "1")).unwrap();

        let err = store.reorder_script("A", 0, 1).unwrap_err();
        assert!(matches!(err, SnipzError::OutOfRange { index: 1, len: 1 }));
        assert_eq!(
            store.reorder_script("Missing", 0, 0).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn failed_save_keeps_memory_and_can_be_retried() {
        let mut store = store();
        store.add_category("A").unwrap();

        store.backend().set_simulate_write_error(true);
        let err = store.add_category("B").unwrap_err();
        assert!(err.is_persistence_failure());
        assert_eq!(store.category_names(), vec!["A", "B"]);
        assert!(!store.backend().document().unwrap().contains("\"B\""));

        store.backend().set_simulate_write_error(false);
        store.persist().unwrap();
        assert!(store.backend().document().unwrap().contains("\"B\""));
    }

    #[test]
    fn mutation_is_logged_only_once_saved() {
        let mut store = store();
        store.add_category("A").unwrap();

        let failed = capture_logs(|| {
            store.backend().set_simulate_write_error(true);
            assert!(store.add_script("A", draft("one", "1")).is_err());
        });
        assert!(failed.contains("catalog save failed"));
        assert!(!failed.contains("script added"));

        let saved = capture_logs(|| {
            store.backend().set_simulate_write_error(false);
            store.add_script("A", draft("two", "2")).unwrap();
        });
        assert!(saved.contains("script added"));
    }
}
