use crate::commands::{CmdMessage, CmdResult, DisplayScript};
use crate::error::{Result, SnipzError};
use crate::model::{ScriptDraft, ScriptSelector};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;

fn listed<B: StorageBackend>(store: &CatalogStore<B>, category: &str) -> Vec<DisplayScript> {
    store
        .category(category)
        .map(DisplayScript::list)
        .unwrap_or_default()
}

fn position_of<B: StorageBackend>(
    store: &CatalogStore<B>,
    category: &str,
    selector: &ScriptSelector,
) -> Option<usize> {
    store
        .category(category)
        .and_then(|c| c.position_of(selector))
}

pub fn list<B: StorageBackend>(store: &CatalogStore<B>, category: &str) -> Result<CmdResult> {
    let cat = store
        .category(category)
        .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", category)))?;
    let mut result = CmdResult::default().with_listed_scripts(DisplayScript::list(cat));
    if result.listed_scripts.is_empty() {
        result.add_message(CmdMessage::info(format!("No scripts in {} yet.", category)));
    }
    Ok(result)
}

pub fn show<B: StorageBackend>(
    store: &CatalogStore<B>,
    category: &str,
    selector: &ScriptSelector,
) -> Result<CmdResult> {
    let cat = store
        .category(category)
        .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", category)))?;
    let index = cat.position_of(selector).ok_or_else(|| {
        SnipzError::NotFound(format!("script {} in category \"{}\"", selector, category))
    })?;
    let display = DisplayScript::new(category, index, cat.scripts[index].clone());
    Ok(CmdResult::default().with_listed_scripts(vec![display]))
}

pub fn create<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    category: &str,
    draft: ScriptDraft,
) -> Result<CmdResult> {
    let script = store.add_script(category, draft)?;
    let index = store
        .category(category)
        .map(|c| c.scripts.len().saturating_sub(1))
        .unwrap_or_default();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script created in {}: {}",
        category, script.name
    )));
    result
        .affected_scripts
        .push(DisplayScript::new(category, index, script));
    Ok(result.with_listed_scripts(listed(store, category)))
}

pub fn update<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    category: &str,
    selector: &ScriptSelector,
    draft: ScriptDraft,
) -> Result<CmdResult> {
    let script = store.update_script(category, selector, draft)?;
    let index = position_of(store, category, &ScriptSelector::Id(script.id)).unwrap_or_default();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script updated ({}): {}",
        index + 1,
        script.name
    )));
    result
        .affected_scripts
        .push(DisplayScript::new(category, index, script));
    Ok(result.with_listed_scripts(listed(store, category)))
}

pub fn delete<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    category: &str,
    selector: &ScriptSelector,
) -> Result<CmdResult> {
    let index = position_of(store, category, selector).unwrap_or_default();
    let removed = store.delete_script(category, selector)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script deleted from {}: {}",
        category, removed.name
    )));
    result
        .affected_scripts
        .push(DisplayScript::new(category, index, removed));
    Ok(result.with_listed_scripts(listed(store, category)))
}

/// Swap two scripts, given as zero-based positions.
pub fn reorder<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    category: &str,
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    store.reorder_script(category, from, to)?;

    let scripts = listed(store, category);
    let mut result = CmdResult::default();
    if from == to {
        result.add_message(CmdMessage::info("Nothing to swap."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Swapped {} and {} in {}",
            scripts[to].script.name, scripts[from].script.name, category
        )));
        result.affected_scripts = vec![scripts[from].clone(), scripts[to].clone()];
    }
    Ok(result.with_listed_scripts(scripts))
}
