//! Turns section values of a [`JobRecord`](crate::record::JobRecord) into body blocks.
//!
//! Lists become bullet entries, text becomes a body paragraph, and mappings are dispatched on
//! the section they belong to.  Values with no content produce no blocks at all.

use crate::model::Block;
use crate::record::{Content, SectionKind};
use crate::richtext::Span;
use crate::styles::TextRole;

/// Prefix of every bullet entry.
pub const BULLET: &str = "• ";

/// Maximum number of entries kept when flattening the "What We Offer" mapping.
pub const OFFER_LIMIT: usize = 5;

/// Maximum number of entries kept when flattening the benefits mapping.
pub const BENEFITS_LIMIT: usize = 8;

/// Formats the value of one section.
pub fn format_section(kind: SectionKind, value: &Content) -> Vec<Block> {
    match value {
        Content::Empty => Vec::new(),
        Content::Text(_) => format_text(value),
        Content::List(items) => format_bullets(items),
        Content::Map(_) => format_mapping(kind, value),
    }
}

/// A body paragraph for textual content, nothing for blank text.
fn format_text(value: &Content) -> Vec<Block> {
    if !value.has_content() {
        return Vec::new();
    }
    vec![Block::plain(TextRole::Body, value.inline_text())]
}

/// Formats every entry with content as a bullet.
pub fn format_bullets(items: &[Content]) -> Vec<Block> {
    items
        .iter()
        .filter(|item| item.has_content())
        .flat_map(format_bullet)
        .collect()
}

/// Formats a single bullet entry.
///
/// Entries of the form `"Title: body"` are split at the first colon into a bold title line and an
/// indented body paragraph.  Entries without a colon are rendered as a bold title line only.
pub fn format_bullet(item: &Content) -> Vec<Block> {
    let text = item.inline_text();
    match text.split_once(':') {
        Some((title, body)) => {
            let mut blocks = vec![Block::text(
                TextRole::BulletTitle,
                vec![
                    Span::new(BULLET),
                    Span::new(format!("{}:", title.trim())).bold(),
                ],
            )];
            let body = body.trim();
            if !body.is_empty() {
                blocks.push(Block::plain(TextRole::BulletBody, body));
            }
            blocks
        }
        None => vec![Block::text(
            TextRole::BulletTitle,
            vec![Span::new(BULLET), Span::new(text.trim()).bold()],
        )],
    }
}

fn format_mapping(kind: SectionKind, value: &Content) -> Vec<Block> {
    match kind {
        SectionKind::TechnicalRequirements => {
            let mut blocks = list_or_text(value.get("must_have_skills"));
            if let Some(nice) = value.get("nice_to_have_skills").filter(|v| v.has_content()) {
                let nice_blocks = list_or_text(Some(nice));
                if !nice_blocks.is_empty() {
                    blocks.push(Block::bold(TextRole::Body, "Nice to have:"));
                    blocks.extend(nice_blocks);
                }
            }
            blocks
        }
        SectionKind::Qualifications => list_or_text(value.get("mandatory_requirements")),
        SectionKind::ExperienceSkills => list_or_text(value.get("professional_experience")),
        SectionKind::WhatWeOffer => flattened(value, OFFER_LIMIT),
        SectionKind::Benefits => flattened(value, BENEFITS_LIMIT),
        SectionKind::ApplicationProcess => match value.get("how_to_apply") {
            Some(how) if how.as_text().is_some() => format_text(how),
            _ => Vec::new(),
        },
        _ => labelled(value),
    }
}

/// Bullets for a list, a paragraph for text, nothing for anything else.
fn list_or_text(value: Option<&Content>) -> Vec<Block> {
    match value {
        Some(Content::List(items)) => format_bullets(items),
        Some(text @ Content::Text(_)) => format_text(text),
        _ => Vec::new(),
    }
}

/// Collects the entries of every sub-value in key order, keeps the first `limit` and formats them
/// as bullets.  Blank list entries count towards the limit but are not rendered.
fn flattened(value: &Content, limit: usize) -> Vec<Block> {
    let Some(entries) = value.as_map() else {
        return Vec::new();
    };

    let mut items: Vec<Content> = Vec::new();
    for (_, sub) in entries.iter().filter(|(_, sub)| sub.has_content()) {
        match sub {
            Content::List(list) => items.extend(list.iter().cloned()),
            other => items.push(Content::text(other.inline_text())),
        }
    }
    items.truncate(limit);
    format_bullets(&items)
}

/// Renders each sub-key as a bold label followed by its value.
fn labelled(value: &Content) -> Vec<Block> {
    let Some(entries) = value.as_map() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    for (key, sub) in entries.iter().filter(|(_, sub)| sub.has_content()) {
        blocks.push(Block::bold(TextRole::Body, format!("{}:", title_case(key))));
        match sub {
            Content::List(items) => blocks.extend(format_bullets(items)),
            other => blocks.push(Block::plain(TextRole::Body, other.inline_text())),
        }
    }
    blocks
}

/// `"company_culture"` -> `"Company Culture"`.
pub fn title_case(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
