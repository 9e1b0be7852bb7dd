//! Category entry dialog
//!
//! Adds a category or renames and re-parents an existing one. When editing,
//! the category itself and its subtree are left out of the parent choices.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Clear,
    Frame,
};

use super::{
    category_choices, cycle, dialog_block, edit_text, form_navigation, render_form_footer,
    render_selector_field, FormAction, FormNav,
};
use crate::models::{Category, CategoryPk};
use crate::services::category_tree::descendants;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;
use crate::view::Intent;

const TOP_LEVEL: &str = "(top level)";

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Parent,
}

/// State for the category form dialog
#[derive(Debug, Clone, Default)]
pub struct CategoryFormState {
    pub editing: Option<Category>,
    pub name_input: TextInput,
    /// Parent choices; the first entry is always the top level
    pub parents: Vec<(Option<CategoryPk>, String)>,
    pub selected_parent_index: usize,
    pub focused_field: CategoryField,
    pub error_message: Option<String>,
}

impl CategoryFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the form for a new category
    pub fn init_for_add(&mut self, categories: &[Category]) {
        *self = Self {
            name_input: TextInput::new()
                .label("Name")
                .placeholder("e.g. groceries"),
            parents: parent_choices(categories, None),
            ..Self::default()
        };
    }

    /// Load an existing category into the form
    pub fn init_for_edit(&mut self, category: &Category, categories: &[Category]) {
        self.init_for_add(categories);
        self.name_input = self.name_input.clone().content(category.name.clone());
        self.parents = parent_choices(categories, Some(category.pk));
        self.selected_parent_index = self
            .parents
            .iter()
            .position(|(pk, _)| *pk == category.parent)
            .unwrap_or(0);
        self.editing = Some(category.clone());
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            CategoryField::Name => CategoryField::Parent,
            CategoryField::Parent => CategoryField::Name,
        };
    }

    /// Handle a key press while the dialog is open
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match form_navigation(key) {
            Some(FormNav::Action(action)) => return action,
            Some(FormNav::Next) | Some(FormNav::Prev) => self.next_field(),
            None => match self.focused_field {
                CategoryField::Name => edit_text(&mut self.name_input, key),
                CategoryField::Parent => match key.code {
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        self.selected_parent_index =
                            cycle(self.selected_parent_index, self.parents.len(), true);
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.selected_parent_index =
                            cycle(self.selected_parent_index, self.parents.len(), false);
                    }
                    _ => {}
                },
            },
        }
        self.error_message = None;
        FormAction::None
    }

    pub fn selected_parent(&self) -> Option<CategoryPk> {
        self.parents
            .get(self.selected_parent_index)
            .and_then(|(pk, _)| *pk)
    }

    /// Build the create or update intent from the form
    pub fn build_intent(&self) -> Result<Intent, String> {
        let name = self.name_input.value().trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let parent = self.selected_parent();

        Ok(match &self.editing {
            Some(original) => {
                let mut category = original.clone();
                category.name = name.to_string();
                category.parent = parent;
                Intent::UpdateCategory(category)
            }
            None => Intent::CreateCategory(Category::with_parent(name, parent)),
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Parent choices, excluding `editing` and everything below it
fn parent_choices(
    categories: &[Category],
    editing: Option<CategoryPk>,
) -> Vec<(Option<CategoryPk>, String)> {
    let excluded: Vec<CategoryPk> = match editing {
        Some(pk) => std::iter::once(pk)
            .chain(descendants(categories, pk).iter().map(|c| c.pk))
            .collect(),
        None => Vec::new(),
    };

    std::iter::once((None, TOP_LEVEL.to_string()))
        .chain(
            category_choices(categories)
                .into_iter()
                .filter(|(pk, _)| !excluded.contains(pk))
                .map(|(pk, name)| (Some(pk), name)),
        )
        .collect()
}

/// Render the category dialog
pub fn render(frame: &mut Frame, form: &CategoryFormState) {
    let area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let title = match &form.editing {
        Some(category) => format!(" Edit Category #{} ", category.pk),
        None => " Add Category ".to_string(),
    };
    let block = dialog_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Parent
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        form.name_input
            .clone()
            .focused(form.focused_field == CategoryField::Name),
        chunks[0],
    );

    let parent_name = form
        .parents
        .get(form.selected_parent_index)
        .map(|(_, name)| name.as_str())
        .unwrap_or(TOP_LEVEL);
    render_selector_field(
        frame,
        chunks[1],
        "Parent",
        parent_name,
        form.focused_field == CategoryField::Parent,
    );

    render_form_footer(frame, chunks[3], chunks[4], form.error_message.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Category> {
        let mut food = Category::new("food");
        food.pk = CategoryPk::new(1);
        let mut meat = Category::with_parent("meat", Some(CategoryPk::new(1)));
        meat.pk = CategoryPk::new(2);
        let mut raw = Category::with_parent("raw meat", Some(CategoryPk::new(2)));
        raw.pk = CategoryPk::new(3);
        let mut books = Category::new("books");
        books.pk = CategoryPk::new(4);
        vec![food, meat, raw, books]
    }

    #[test]
    fn test_add_under_parent() {
        let mut form = CategoryFormState::new();
        form.init_for_add(&tree());
        for c in "sweets".chars() {
            form.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        form.handle_key(KeyEvent::from(KeyCode::Tab));
        form.handle_key(KeyEvent::from(KeyCode::Right));

        match form.build_intent().unwrap() {
            Intent::CreateCategory(category) => {
                assert_eq!(category.name, "sweets");
                assert_eq!(category.parent, Some(CategoryPk::new(1)));
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_edit_excludes_subtree() {
        let categories = tree();
        let mut form = CategoryFormState::new();
        form.init_for_edit(&categories[1], &categories);

        let offered: Vec<Option<CategoryPk>> = form.parents.iter().map(|(pk, _)| *pk).collect();
        assert_eq!(
            offered,
            vec![None, Some(CategoryPk::new(1)), Some(CategoryPk::new(4))]
        );
        assert_eq!(form.selected_parent(), Some(CategoryPk::new(1)));
    }

    #[test]
    fn test_move_to_top_level() {
        let categories = tree();
        let mut form = CategoryFormState::new();
        form.init_for_edit(&categories[1], &categories);
        form.handle_key(KeyEvent::from(KeyCode::Tab));
        form.handle_key(KeyEvent::from(KeyCode::Left));

        match form.build_intent().unwrap() {
            Intent::UpdateCategory(category) => {
                assert_eq!(category.pk, CategoryPk::new(2));
                assert_eq!(category.parent, None);
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut form = CategoryFormState::new();
        form.init_for_add(&[]);
        assert_eq!(form.build_intent().unwrap_err(), "Name is required");
    }
}
