use crate::commands::{CategorySummary, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Catalog, Direction};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;

pub(crate) fn summaries(catalog: &Catalog) -> Vec<CategorySummary> {
    catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(i, c)| CategorySummary {
            name: c.name.clone(),
            position: i + 1,
            script_count: c.scripts.len(),
        })
        .collect()
}

pub fn list<B: StorageBackend>(store: &CatalogStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_categories(summaries(store.catalog()));
    if result.categories.is_empty() {
        result.add_message(CmdMessage::info(
            "No categories yet. Create one to get started.",
        ));
    }
    Ok(result)
}

pub fn create<B: StorageBackend>(store: &mut CatalogStore<B>, name: &str) -> Result<CmdResult> {
    store.add_category(name)?;
    let mut result = CmdResult::default().with_categories(summaries(store.catalog()));
    result.add_message(CmdMessage::success(format!("Category created: {}", name)));
    Ok(result)
}

pub fn rename<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    old_name: &str,
    new_name: &str,
) -> Result<CmdResult> {
    store.rename_category(old_name, new_name)?;
    let mut result = CmdResult::default().with_categories(summaries(store.catalog()));
    result.add_message(CmdMessage::success(format!(
        "Category renamed: {} -> {}",
        old_name, new_name
    )));
    Ok(result)
}

pub fn delete<B: StorageBackend>(store: &mut CatalogStore<B>, name: &str) -> Result<CmdResult> {
    let removed = store.remove_category(name)?;
    let mut result = CmdResult::default().with_categories(summaries(store.catalog()));
    result.add_message(CmdMessage::success(format!(
        "Category deleted: {} ({} scripts)",
        name,
        removed.scripts.len()
    )));
    if store.catalog().is_empty() {
        result.add_message(CmdMessage::info("The catalog is empty again."));
    }
    Ok(result)
}

pub fn move_category<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    name: &str,
    direction: Direction,
) -> Result<CmdResult> {
    let moved = store.move_category(name, direction)?;
    let mut result = CmdResult::default().with_categories(summaries(store.catalog()));
    if moved {
        result.add_message(CmdMessage::success(format!(
            "Category moved {}: {}",
            direction, name
        )));
    } else {
        let edge = match direction {
            Direction::Up => "first",
            Direction::Down => "last",
        };
        result.add_message(CmdMessage::info(format!(
            "Category {} is already {}",
            name, edge
        )));
    }
    Ok(result)
}
