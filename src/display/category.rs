//! Category display formatting
//!
//! Formats the category forest for terminal output.

use crate::models::Category;
use crate::services::category_tree::tree_order;

/// Format categories as an indented tree, roots in insertion order
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nAdd one with: category <name> [under <parent>]\n"
            .to_string();
    }

    let mut output = String::new();
    for (depth, category) in tree_order(categories) {
        output.push_str(&format!(
            "{}#{:<4} {}\n",
            "  ".repeat(depth),
            category.pk,
            category.name
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryPk;

    fn category(pk: u64, name: &str, parent: Option<u64>) -> Category {
        let mut category = Category::with_parent(name, parent.map(CategoryPk::new));
        category.pk = CategoryPk::new(pk);
        category
    }

    #[test]
    fn test_format_empty_tree() {
        let output = format_category_tree(&[]);
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_tree() {
        let categories = vec![
            category(1, "food", None),
            category(2, "books", None),
            category(3, "meat", Some(1)),
        ];
        let output = format_category_tree(&categories);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "#1    food");
        assert_eq!(lines[1], "  #3    meat");
        assert_eq!(lines[2], "#2    books");
    }
}
