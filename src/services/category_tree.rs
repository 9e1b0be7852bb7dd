//! Category tree construction and hierarchy queries
//!
//! Categories are seeded from an indented outline:
//!
//! ```text
//! food
//!     meat
//!         raw meat
//!     sweets
//! books
//! ```
//!
//! Each line nests under the nearest preceding line with less indentation.
//! The indentation unit is not fixed; only relative depth matters.
//!
//! The query helpers work on a slice of categories (usually a snapshot) and
//! always resolve parents by key, so gaps left by deletions are harmless.

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Category, CategoryPk};
use crate::storage::Repository;

/// One non-blank line of an outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Count of leading whitespace characters
    pub depth: usize,
    /// The line with surrounding whitespace removed
    pub name: String,
}

/// Split an outline into entries, skipping blank lines
pub fn parse_outline<I, S>(lines: I) -> Vec<OutlineEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let name = line.trim();
            if name.is_empty() {
                return None;
            }
            let depth = line.chars().take_while(|c| c.is_whitespace()).count();
            Some(OutlineEntry {
                depth,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Parse an outline and store every entry as a category
///
/// Returns the created categories in outline order, with keys assigned.
pub fn build_category_tree<I, S, R>(lines: I, repo: &R) -> BookkeeperResult<Vec<Category>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Repository<Category> + ?Sized,
{
    let mut stack: Vec<(usize, CategoryPk)> = Vec::new();
    let mut created = Vec::new();

    for entry in parse_outline(lines) {
        while stack.last().is_some_and(|(depth, _)| *depth >= entry.depth) {
            stack.pop();
        }

        let parent = stack.last().map(|(_, pk)| *pk);
        let mut category = Category::with_parent(entry.name, parent);
        category
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;

        let pk = repo.add(&mut category)?;
        stack.push((entry.depth, pk));
        created.push(category);
    }

    Ok(created)
}

/// Find a category by key
pub fn find(categories: &[Category], pk: CategoryPk) -> Option<&Category> {
    categories.iter().find(|c| c.pk == pk)
}

/// Display name for a category key, with a placeholder for dangling references
pub fn label(categories: &[Category], pk: CategoryPk) -> String {
    match find(categories, pk) {
        Some(category) => category.name.clone(),
        None => format!("<deleted #{}>", pk),
    }
}

/// Parent chain of a category, nearest first
///
/// Stops at a root or at a parent key that no longer resolves.
pub fn ancestors(categories: &[Category], pk: CategoryPk) -> Vec<&Category> {
    let mut chain = Vec::new();
    let mut current = find(categories, pk).and_then(|c| c.parent);

    while let Some(parent_pk) = current {
        // A corrupt cycle cannot be longer than the slice itself.
        if chain.len() >= categories.len() {
            break;
        }
        match find(categories, parent_pk) {
            Some(parent) => {
                chain.push(parent);
                current = parent.parent;
            }
            None => break,
        }
    }

    chain
}

/// Number of resolvable ancestors
pub fn depth(categories: &[Category], pk: CategoryPk) -> usize {
    ancestors(categories, pk).len()
}

/// Direct children of a category, in store order
pub fn children(categories: &[Category], pk: CategoryPk) -> Vec<&Category> {
    categories
        .iter()
        .filter(|c| c.parent == Some(pk))
        .collect()
}

/// All descendants of a category, depth-first
pub fn descendants(categories: &[Category], pk: CategoryPk) -> Vec<&Category> {
    let mut result = Vec::new();
    collect_descendants(categories, pk, &mut result);
    result
}

fn collect_descendants<'a>(
    categories: &'a [Category],
    pk: CategoryPk,
    result: &mut Vec<&'a Category>,
) {
    for child in children(categories, pk) {
        if result.iter().any(|c| c.pk == child.pk) {
            continue;
        }
        result.push(child);
        collect_descendants(categories, child.pk, result);
    }
}

/// Categories in display order, each paired with its depth
///
/// Roots come in store order, each followed by its subtree. A category whose
/// parent was deleted is shown as a root.
pub fn tree_order(categories: &[Category]) -> Vec<(usize, &Category)> {
    let mut ordered = Vec::with_capacity(categories.len());

    let roots = categories
        .iter()
        .filter(|c| c.parent.map_or(true, |p| find(categories, p).is_none()));

    for root in roots {
        ordered.push((0, root));
        let base = depth(categories, root.pk);
        for descendant in descendants(categories, root.pk) {
            ordered.push((depth(categories, descendant.pk) - base, descendant));
        }
    }

    ordered
}

/// Whether re-parenting `pk` under `new_parent` would close a loop
pub fn would_create_cycle(categories: &[Category], pk: CategoryPk, new_parent: CategoryPk) -> bool {
    new_parent == pk
        || ancestors(categories, new_parent)
            .iter()
            .any(|ancestor| ancestor.pk == pk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRepository;

    const OUTLINE: &str = "food\n    meat\n        raw meat\n    sweets\nbooks\n";

    fn seeded() -> (MemoryRepository<Category>, Vec<Category>) {
        let repo = MemoryRepository::new();
        let created = build_category_tree(OUTLINE.lines(), &repo).unwrap();
        (repo, created)
    }

    fn by_name<'a>(categories: &'a [Category], name: &str) -> &'a Category {
        categories.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_parse_outline_depths() {
        let entries = parse_outline(OUTLINE.lines());
        let depths: Vec<usize> = entries.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 4, 8, 4, 0]);
        assert_eq!(entries[2].name, "raw meat");
    }

    #[test]
    fn test_parse_outline_skips_blank_lines() {
        let entries = parse_outline(["", "food", "   ", "\tmeat", ""]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].depth, 1);
    }

    #[test]
    fn test_build_tree_parents() {
        let (repo, created) = seeded();
        assert_eq!(created.len(), 5);
        assert_eq!(repo.len().unwrap(), 5);

        let food = by_name(&created, "food");
        let meat = by_name(&created, "meat");
        assert_eq!(food.parent, None);
        assert_eq!(meat.parent, Some(food.pk));
        assert_eq!(by_name(&created, "raw meat").parent, Some(meat.pk));
        assert_eq!(by_name(&created, "sweets").parent, Some(food.pk));
        assert_eq!(by_name(&created, "books").parent, None);
    }

    #[test]
    fn test_build_tree_matches_repository() {
        let (repo, created) = seeded();
        assert_eq!(repo.get_all(None).unwrap(), created);
    }

    #[test]
    fn test_indented_first_line_is_root() {
        let repo = MemoryRepository::new();
        let created = build_category_tree(["    food", "        meat", "books"], &repo).unwrap();
        assert_eq!(created[0].parent, None);
        assert_eq!(created[1].parent, Some(created[0].pk));
        assert_eq!(created[2].parent, None);
    }

    #[test]
    fn test_indentation_unit_is_not_fixed() {
        let repo = MemoryRepository::new();
        let created = build_category_tree(["a", "  b", "       c", "   d"], &repo).unwrap();
        // "d" is shallower than "c" but deeper than "b", so it nests under "b".
        assert_eq!(created[2].parent, Some(created[1].pk));
        assert_eq!(created[3].parent, Some(created[1].pk));
    }

    #[test]
    fn test_duplicate_names_are_distinct() {
        let repo = MemoryRepository::new();
        let created = build_category_tree(["food", "  misc", "books", "  misc"], &repo).unwrap();
        assert_eq!(created.len(), 4);
        assert_ne!(created[1].pk, created[3].pk);
        assert_eq!(created[3].parent, Some(created[2].pk));
    }

    #[test]
    fn test_ancestors_and_depth() {
        let (_repo, created) = seeded();
        let raw = by_name(&created, "raw meat");
        let names: Vec<&str> = ancestors(&created, raw.pk)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["meat", "food"]);
        assert_eq!(depth(&created, raw.pk), 2);
        assert_eq!(depth(&created, by_name(&created, "books").pk), 0);
    }

    #[test]
    fn test_children_and_descendants() {
        let (_repo, created) = seeded();
        let food = by_name(&created, "food");
        let kids: Vec<&str> = children(&created, food.pk)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(kids, vec!["meat", "sweets"]);

        let all: Vec<&str> = descendants(&created, food.pk)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(all, vec!["meat", "raw meat", "sweets"]);
    }

    #[test]
    fn test_tree_order_with_dangling_parent() {
        let (_repo, mut created) = seeded();
        // Drop "meat": "raw meat" now points at a key that no longer resolves.
        created.retain(|c| c.name != "meat");

        let order: Vec<(usize, &str)> = tree_order(&created)
            .into_iter()
            .map(|(d, c)| (d, c.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "food"), (1, "sweets"), (0, "raw meat"), (0, "books")]
        );
    }

    #[test]
    fn test_label_uses_key_lookup() {
        let (_repo, mut created) = seeded();
        created.retain(|c| c.name != "food");
        // Position 0 is now "meat", but key 1 is gone.
        assert_eq!(label(&created, CategoryPk::new(1)), "<deleted #1>");
        assert_eq!(label(&created, CategoryPk::new(3)), "raw meat");
    }

    #[test]
    fn test_would_create_cycle() {
        let (_repo, created) = seeded();
        let food = by_name(&created, "food").pk;
        let raw = by_name(&created, "raw meat").pk;
        let books = by_name(&created, "books").pk;
        assert!(would_create_cycle(&created, food, raw));
        assert!(would_create_cycle(&created, food, food));
        assert!(!would_create_cycle(&created, books, raw));
    }
}
