//! HTML rendering of the chat page.
//!
//! Queries go through handlebars' default HTML escaping. Answers are Markdown:
//! they are converted to HTML on the server and sanitized with `ammonia`
//! before being inserted raw, so model output cannot inject markup or script.

use handlebars::Handlebars;
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;

use crate::{core::session::Turn, error_handler::AppError};

const INDEX_TEMPLATE: &str = "index";
pub const PAGE_TITLE: &str = "Guideline Chatbot";

/// Compiled page templates.
pub struct PageRenderer {
    hb: Handlebars<'static>,
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    turns: Vec<TurnView<'a>>,
}

#[derive(Serialize)]
struct TurnView<'a> {
    number: usize,
    query: &'a str,
    response_html: String,
}

impl PageRenderer {
    /// Compiles the bundled templates.
    pub fn new() -> Result<Self, AppError> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        hb.register_template_string(INDEX_TEMPLATE, include_str!("../../templates/index.hbs"))?;
        Ok(Self { hb })
    }

    /// Renders the form followed by `history`, oldest turn first.
    pub fn render_page(&self, history: &[Turn]) -> Result<String, AppError> {
        let view = PageView {
            title: PAGE_TITLE,
            turns: history
                .iter()
                .enumerate()
                .map(|(i, t)| TurnView {
                    number: i + 1,
                    query: &t.query,
                    response_html: markdown_to_safe_html(&t.response),
                })
                .collect(),
        };
        Ok(self.hb.render(INDEX_TEMPLATE, &view)?)
    }
}

/// Markdown → HTML, then sanitized.
pub fn markdown_to_safe_html(md: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut raw = String::with_capacity(md.len() * 3 / 2);
    html::push_html(&mut raw, Parser::new_ext(md, opts));
    ammonia::clean(&raw)
}
