//! Export functionality: markdown rendering and static site generation.
//!
//! The site is a card grid of every published note, one listing page per
//! category and a reader page per note, styled by a CSS theme.

mod html;
pub mod links;
pub mod site;
pub mod template;
mod theme;

pub use html::{
    ListWrapping, RenderOptions, WikiLinkTarget, escape_html, markdown_to_html,
    markdown_to_html_with,
};
pub use links::{LinkResolver, LinkResolverOptions};
pub use site::{SiteConfig, SiteResult, generate_site};
pub use template::{EMPTY_STATE_MESSAGE, NoteCard, format_card_date};
pub use theme::{THEME_DARK, THEME_DEFAULT, get_theme_css};
