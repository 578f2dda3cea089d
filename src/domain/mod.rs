//! Core types: NoteRecord, Category, publish rules, the filtered view

mod category;
mod note;
mod publish;
mod view;

pub use category::{Category, ParseCategoryError};
pub use note::{NoteRecord, NoteRecordBuilder};
pub use publish::{CriteriaError, PublishCriteria, PublishPreset, should_publish};
pub use view::{ALL_CATEGORIES, CategoryFilter, compare_titles, find_by_name, view};
