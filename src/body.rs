//! Assembles the document body from a [`JobRecord`].

use crate::formatter;
use crate::model::{Block, RuleShade};
use crate::record::{JobRecord, SectionKind};
use crate::styles::TextRole;

/// Title used when the record carries no job title.
pub const DEFAULT_JOB_TITLE: &str = "Software Developer";

/// Builds the ordered body blocks for `record`.
///
/// The body always starts with the job title, followed by the metadata lines that have content.
/// A grey rule separates that preamble from the sections when anything follows the title.  Each
/// section with renderable content gets a bold header, and consecutive sections are separated by
/// a light grey rule.  Sections that produce no content are left out entirely, header included.
pub fn build_body(record: &JobRecord) -> Vec<Block> {
    let mut blocks = vec![title_block(record)];

    let metadata: Vec<Block> = record
        .metadata()
        .filter(|(_, value)| value.has_content())
        .map(|(label, value)| {
            Block::plain(TextRole::Meta, format!("{}: {}", label, value.inline_text()))
        })
        .collect();

    let sections: Vec<(SectionKind, Vec<Block>)> = SectionKind::ALL
        .iter()
        .filter_map(|&kind| {
            let value = record.section(kind);
            if !value.has_content() {
                return None;
            }
            let content = formatter::format_section(kind, value);
            (!content.is_empty()).then_some((kind, content))
        })
        .collect();

    if metadata.is_empty() && sections.is_empty() {
        return blocks;
    }

    blocks.extend(metadata);
    blocks.extend([
        Block::spacer(10.0),
        Block::rule(1.0, RuleShade::Grey),
        Block::spacer(8.0),
    ]);

    for (index, (kind, content)) in sections.into_iter().enumerate() {
        if index > 0 {
            blocks.extend([
                Block::spacer(8.0),
                Block::rule(0.5, RuleShade::LightGrey),
                Block::spacer(8.0),
            ]);
        }
        blocks.push(Block::bold(TextRole::SectionHeader, kind.title()));
        blocks.extend(content);
    }

    blocks
}

fn title_block(record: &JobRecord) -> Block {
    let title = if record.job_title.has_content() {
        record.job_title.inline_text()
    } else {
        DEFAULT_JOB_TITLE.to_string()
    };
    Block::bold(TextRole::Title, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Content;

    fn headers(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter(|block| block.role() == Some(TextRole::SectionHeader))
            .map(|block| block.as_text().unwrap().plain_text())
            .collect()
    }

    #[test]
    fn empty_record_renders_title_only() {
        let blocks = build_body(&JobRecord::default());
        assert_eq!(blocks, vec![Block::bold(TextRole::Title, DEFAULT_JOB_TITLE)]);
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let record = JobRecord {
            job_title: Content::text("   "),
            team: Content::text(" "),
            key_responsibilities: Content::list(["", "  "]),
            ..JobRecord::default()
        };
        let blocks = build_body(&record);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].as_text().unwrap().plain_text(),
            DEFAULT_JOB_TITLE
        );
    }

    #[test]
    fn metadata_lines_use_labels_in_order() {
        let record = JobRecord {
            job_title: Content::text("Backend Engineer"),
            location: Content::text("Berlin"),
            team: Content::text("Platform"),
            ..JobRecord::default()
        };
        let blocks = build_body(&record);
        let meta: Vec<String> = blocks
            .iter()
            .filter(|block| block.role() == Some(TextRole::Meta))
            .map(|block| block.as_text().unwrap().plain_text())
            .collect();
        assert_eq!(meta, vec!["Team: Platform", "Location: Berlin"]);
        assert_eq!(blocks.iter().filter(|block| block.is_rule()).count(), 1);
    }

    #[test]
    fn sections_follow_canonical_order_with_rules_between() {
        let record = JobRecord {
            benefits: Content::list(["Health: full cover"]),
            company_overview: Content::text("Acme builds rockets."),
            key_responsibilities: Content::list(["Build APIs: Design REST services"]),
            ..JobRecord::default()
        };
        let blocks = build_body(&record);
        assert_eq!(
            headers(&blocks),
            vec!["Company Overview", "Key Responsibilities", "Benefits & Perks"]
        );

        let rules: Vec<&Block> = blocks.iter().filter(|block| block.is_rule()).collect();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0], &Block::rule(1.0, RuleShade::Grey));
        assert_eq!(rules[1], &Block::rule(0.5, RuleShade::LightGrey));
        assert!(!blocks.last().unwrap().is_rule());
    }

    #[test]
    fn sections_without_renderable_content_have_no_header() {
        let record = JobRecord {
            qualifications: Content::map([("unexpected", Content::list(["x"]))]),
            role_overview: Content::text("Own the API."),
            ..JobRecord::default()
        };
        assert_eq!(headers(&build_body(&record)), vec!["Role Overview"]);
    }

    #[test]
    fn legacy_benefits_key_is_rendered() {
        let record = JobRecord {
            compensation_benefits: Content::list(["Pension"]),
            ..JobRecord::default()
        };
        assert_eq!(headers(&build_body(&record)), vec!["Benefits & Perks"]);
    }
}
