//! HTML templates for the static site.

use anyhow::Result;
use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::domain::NoteRecord;

/// Number of tags shown on a note card.
pub const CARD_TAG_LIMIT: usize = 3;

/// Shown in place of the card grid when nothing matches.
pub const EMPTY_STATE_MESSAGE: &str = "No notes found. Try adjusting your search or filter.";

/// Template for the index and per-category listing pages.
pub const LISTING_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% if heading %}{{ heading }} - {% endif %}{{ site_title }}</title>
    <link rel="stylesheet" href="{{ root_path }}style.css">
</head>
<body>
    <header>
        <h1>{% if heading %}{{ heading }}{% else %}{{ site_title }}{% endif %}</h1>
        <p class="note-count">{{ cards | length }} note{% if cards | length != 1 %}s{% endif %}</p>
    </header>
    <nav class="categories" aria-label="Filter by category">
        {% for cat in categories %}
        <a href="{{ root_path }}{{ cat.href }}"{% if cat.name == active %} class="active"{% endif %}>{{ cat.label }}</a>
        {% endfor %}
    </nav>
    <main>
        {% if cards %}
        <section class="notes-grid">
            {% for note in cards %}
            <a class="note-card" data-category="{{ note.category }}" href="{{ root_path }}notes/{{ note.slug }}.html">
                <h3 class="note-title"><span class="category-indicator">{{ note.indicator }}</span> {{ note.title }}</h3>
                <p class="excerpt">{{ note.excerpt }}</p>
                <div class="note-meta">
                    <span class="note-date">{{ note.date }}</span>
                    <span class="tags">{% for tag in note.tags %}<span class="tag">{{ tag }}</span>{% endfor %}</span>
                </div>
            </a>
            {% endfor %}
        </section>
        {% else %}
        <p class="empty-state">{{ empty_message }}</p>
        {% endif %}
    </main>
    <footer>
        <p>Generated {{ generated }}</p>
    </footer>
</body>
</html>"##;

/// Template for a single note in the reader.
pub const READER_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }} - {{ site_title }}</title>
    <link rel="stylesheet" href="{{ root_path }}style.css">
</head>
<body>
    <article>
        <header>
            <nav class="breadcrumb" aria-label="Breadcrumb">
                <a href="{{ root_path }}index.html">Home</a>
                <span aria-hidden="true">/</span>
                <a href="{{ root_path }}categories/{{ category }}.html">{{ category }}</a>
            </nav>
            <h1>{{ title }}</h1>
            <div class="metadata">
                <span class="category-indicator">{{ indicator }}</span>
                <time datetime="{{ modified_iso }}">{{ modified }}</time>
                {% if url %}<span aria-hidden="true"> · </span><a href="{{ url }}" target="_blank" rel="noopener noreferrer">View source</a>{% endif %}
            </div>
            {% if tags %}
            <div class="tags" role="list" aria-label="Tags">
                {% for tag in tags %}<span class="tag" role="listitem">{{ tag }}</span>{% endfor %}
            </div>
            {% endif %}
        </header>
        <main>
            {{ content | safe }}
        </main>
    </article>
    <footer>
        <a href="{{ root_path }}index.html">&larr; Back to index</a>
    </footer>
</body>
</html>"##;

/// Formats a timestamp the way cards show it, e.g. `Feb 2, 2024`.
pub fn format_card_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Everything a note card displays.
#[derive(Debug, Clone, Serialize)]
pub struct NoteCard {
    pub title: String,
    pub excerpt: String,
    pub category: &'static str,
    pub indicator: &'static str,
    pub date: String,
    pub tags: Vec<String>,
    pub slug: String,
}

impl NoteCard {
    /// Card for `note`, linking to its page at `notes/<slug>.html`.
    pub fn from_note(note: &NoteRecord, slug: String) -> Self {
        Self {
            title: note.title().to_string(),
            excerpt: note.excerpt().to_string(),
            category: note.category().as_str(),
            indicator: note.category().indicator(),
            date: format_card_date(note.last_modified()),
            tags: note.tags().iter().take(CARD_TAG_LIMIT).cloned().collect(),
            slug,
        }
    }
}

/// A link in the category navigation.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub label: String,
    pub href: String,
}

/// One listing page: the index or a single category.
pub struct ListingPage<'a> {
    pub site_title: &'a str,
    /// Page heading; the index uses the site title.
    pub heading: Option<&'a str>,
    /// Name of the highlighted category link.
    pub active: &'a str,
    pub root_path: &'a str,
    pub categories: &'a [CategoryLink],
    pub cards: &'a [NoteCard],
    pub generated_at: DateTime<Utc>,
}

/// Compiled site templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        // The .html names turn on auto-escaping.
        env.add_template("listing.html", LISTING_TEMPLATE)?;
        env.add_template("reader.html", READER_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_listing(&self, page: &ListingPage<'_>) -> Result<String> {
        let tmpl = self.env.get_template("listing.html")?;
        let html = tmpl.render(context! {
            site_title => page.site_title,
            heading => page.heading,
            active => page.active,
            root_path => page.root_path,
            categories => page.categories,
            cards => page.cards,
            empty_message => EMPTY_STATE_MESSAGE,
            generated => format_card_date(page.generated_at),
        })?;
        Ok(html)
    }

    /// Renders a note page around already-rendered `content`.
    pub fn render_reader(
        &self,
        note: &NoteRecord,
        content: &str,
        site_title: &str,
        root_path: &str,
    ) -> Result<String> {
        let tmpl = self.env.get_template("reader.html")?;
        let html = tmpl.render(context! {
            site_title => site_title,
            root_path => root_path,
            title => note.title(),
            category => note.category().as_str(),
            indicator => note.category().indicator(),
            modified => format_card_date(note.last_modified()),
            modified_iso => note.last_modified().to_rfc3339(),
            url => note.url(),
            tags => note.tags(),
            content => content,
        })?;
        Ok(html)
    }
}
