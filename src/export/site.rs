//! Static site generation: the card grid, category pages and one reader page
//! per note.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::{ALL_CATEGORIES, Category, CategoryFilter, NoteRecord, view};
use crate::export::html::{ListWrapping, RenderOptions, markdown_to_html_with};
use crate::export::links::{LinkResolver, LinkResolverOptions};
use crate::export::template::{CategoryLink, ListingPage, NoteCard, Templates};
use crate::export::theme::get_theme_css;
use crate::infra::PageSlugs;
use crate::ingest::{ARTIFACT_FILE_NAME, NotesArtifact};

/// Configuration for site generation.
pub struct SiteConfig<'a> {
    /// Site title for listing pages.
    pub site_title: &'a str,
    /// Theme name or path to CSS file.
    pub theme: Option<&'a str>,
    pub lists: ListWrapping,
}

impl Default for SiteConfig<'_> {
    fn default() -> Self {
        Self {
            site_title: "Notes",
            theme: None,
            lists: ListWrapping::default(),
        }
    }
}

/// Result of site generation.
#[derive(Debug)]
pub struct SiteResult {
    /// Number of note pages written.
    pub notes_exported: usize,
    /// Number of category pages written.
    pub category_pages: usize,
    /// Wiki links that matched no note.
    pub broken_links: usize,
}

/// Generates a static site for an artifact's notes.
///
/// Layout of `output_dir`:
///
/// ```text
/// index.html                 every note, as cards
/// categories/<name>.html     one page per category
/// notes/<slug>.html          one reader page per note
/// style.css
/// notes-data.json            copy of the artifact
/// ```
pub fn generate_site(
    artifact: &NotesArtifact,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<SiteResult> {
    let notes = &artifact.notes;
    let notes_dir = output_dir.join("notes");
    let categories_dir = output_dir.join("categories");
    std::fs::create_dir_all(&notes_dir)
        .with_context(|| format!("failed to create {}", notes_dir.display()))?;
    std::fs::create_dir_all(&categories_dir)
        .with_context(|| format!("failed to create {}", categories_dir.display()))?;

    let theme_css = get_theme_css(config.theme)?;
    std::fs::write(output_dir.join("style.css"), theme_css)?;

    let templates = Templates::new()?;
    let nav = category_links();
    let link_options = LinkResolverOptions::default();
    let resolver = LinkResolver::new(notes, &link_options);
    let slugs = resolver.slugs();

    // Index page
    let cards = cards_for(notes, CategoryFilter::All, slugs);
    let index_html = templates.render_listing(&ListingPage {
        site_title: config.site_title,
        heading: None,
        active: ALL_CATEGORIES,
        root_path: "",
        categories: &nav,
        cards: &cards,
        generated_at: artifact.generated_at,
    })?;
    std::fs::write(output_dir.join("index.html"), index_html)?;

    // Category pages
    for category in Category::ALL {
        let cards = cards_for(notes, CategoryFilter::Only(category), slugs);
        let label = category_label(category);
        let html = templates.render_listing(&ListingPage {
            site_title: config.site_title,
            heading: Some(label.as_str()),
            active: category.as_str(),
            root_path: "../",
            categories: &nav,
            cards: &cards,
            generated_at: artifact.generated_at,
        })?;
        std::fs::write(categories_dir.join(format!("{category}.html")), html)?;
        debug!(category = %category, notes = cards.len(), "wrote category page");
    }

    // Reader pages
    let render_options = RenderOptions {
        lists: config.lists,
        wiki_links: Some(&resolver),
    };
    for note in notes {
        let content = markdown_to_html_with(note.content(), &render_options);
        let html = templates.render_reader(note, &content, config.site_title, "../")?;
        let page = notes_dir.join(format!("{}.html", slugs.get(note.path())));
        std::fs::write(&page, html)
            .with_context(|| format!("failed to write {}", page.display()))?;
    }

    artifact.write(&output_dir.join(ARTIFACT_FILE_NAME))?;

    info!(
        notes = notes.len(),
        broken_links = resolver.broken(),
        output = %output_dir.display(),
        "site generated"
    );

    Ok(SiteResult {
        notes_exported: notes.len(),
        category_pages: Category::ALL.len(),
        broken_links: resolver.broken(),
    })
}

fn cards_for(notes: &[NoteRecord], filter: CategoryFilter, slugs: &PageSlugs) -> Vec<NoteCard> {
    view(notes, filter, "")
        .into_iter()
        .map(|note| NoteCard::from_note(note, slugs.get(note.path())))
        .collect()
}

fn category_links() -> Vec<CategoryLink> {
    let all = CategoryLink {
        name: ALL_CATEGORIES.to_string(),
        label: "All".to_string(),
        href: "index.html".to_string(),
    };
    std::iter::once(all)
        .chain(Category::ALL.into_iter().map(|c| CategoryLink {
            name: c.as_str().to_string(),
            label: category_label(c),
            href: format!("categories/{c}.html"),
        }))
        .collect()
}

fn category_label(category: Category) -> String {
    let name = category.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
