use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipzError};
use crate::search::{filter, filter_catalog, SearchGroup};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;

/// Search one category, or every category when `category` is `None`.
///
/// Hidden hits stay in the groups; UIs decide whether to show them.
pub fn run<B: StorageBackend>(
    store: &CatalogStore<B>,
    category: Option<&str>,
    query: &str,
) -> Result<CmdResult> {
    let groups = match category {
        Some(name) => {
            let cat = store
                .category(name)
                .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", name)))?;
            vec![SearchGroup {
                category: cat.name.clone(),
                hits: filter(&cat.scripts, query),
            }]
        }
        None => filter_catalog(store.catalog(), query),
    };

    let visible: usize = groups.iter().map(SearchGroup::visible_count).sum();
    let mut result = CmdResult {
        search_groups: groups,
        ..Default::default()
    };
    if visible == 0 {
        result.add_message(CmdMessage::info(format!("No scripts match \"{}\"", query)));
    }
    Ok(result)
}
