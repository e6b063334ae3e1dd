//! Structured job posting record produced by the content generator.
//!
//! Generator output is loosely shaped: any field may be missing, empty, a plain string, a list of
//! strings or a nested mapping.  [`Content`] captures that shape without losing key order, and
//! [`JobRecord`] gives every known top-level field an explicit, independently optional slot.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A loosely-typed field value as emitted by the generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content {
    /// Absent, `null` or `false`.
    #[default]
    Empty,
    /// A scalar rendered as text.
    Text(String),
    /// An ordered list of entries.
    List(Vec<Content>),
    /// A mapping of sub-section name to value, in source order.
    Map(Vec<(String, Content)>),
}

impl Content {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a list of text values.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|item| Self::Text(item.into())).collect())
    }

    /// Creates a mapping from `(key, value)` pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Content)>,
        K: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Recursive emptiness test gating every rendering decision.
    ///
    /// Whitespace-only text is empty, and so is any list or mapping that holds no entry with
    /// content.
    pub fn has_content(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(text) => !text.trim().is_empty(),
            Self::List(items) => items.iter().any(Content::has_content),
            Self::Map(entries) => entries.iter().any(|(_, value)| value.has_content()),
        }
    }

    /// Returns the text of a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the entries of a mapping value.
    pub fn as_map(&self) -> Option<&[(String, Content)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key in a mapping value. Non-mapping values yield `None`.
    pub fn get(&self, key: &str) -> Option<&Content> {
        match self {
            Self::Map(entries) => entries
                .iter()
                .find(|(candidate, _)| candidate == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Flattens the value into a single line of text.
    ///
    /// Lists are joined with `", "`, mappings render as `key: value` pairs separated by `"; "`.
    /// Entries without content are left out.
    pub fn inline_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::List(items) => items
                .iter()
                .filter(|item| item.has_content())
                .map(Content::inline_text)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Map(entries) => entries
                .iter()
                .filter(|(_, value)| value.has_content())
                .map(|(key, value)| format!("{}: {}", key, value.inline_text()))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inline_text())
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Self::Empty,
            Value::Bool(true) => Self::Text("true".to_string()),
            Value::Number(number) => Self::Text(number.to_string()),
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(items.into_iter().map(Content::from).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Content::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Content::from)
    }
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Free-function form of [`Content::has_content`] that also accepts missing values.
pub fn has_content(value: Option<&Content>) -> bool {
    value.map_or(false, Content::has_content)
}

/// The semantic body sections, in canonical document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    CompanyOverview,
    RoleOverview,
    KeyResponsibilities,
    TechnicalRequirements,
    WhoYouAre,
    ExperienceSkills,
    Qualifications,
    PreferredQualifications,
    WhatWeOffer,
    Benefits,
    ApplicationProcess,
}

impl SectionKind {
    /// Every section in the order it appears in the document body.
    pub const ALL: [SectionKind; 11] = [
        SectionKind::CompanyOverview,
        SectionKind::RoleOverview,
        SectionKind::KeyResponsibilities,
        SectionKind::TechnicalRequirements,
        SectionKind::WhoYouAre,
        SectionKind::ExperienceSkills,
        SectionKind::Qualifications,
        SectionKind::PreferredQualifications,
        SectionKind::WhatWeOffer,
        SectionKind::Benefits,
        SectionKind::ApplicationProcess,
    ];

    /// The record key the section is read from.
    pub fn key(self) -> &'static str {
        match self {
            Self::CompanyOverview => "company_overview",
            Self::RoleOverview => "role_overview",
            Self::KeyResponsibilities => "key_responsibilities",
            Self::TechnicalRequirements => "technical_requirements",
            Self::WhoYouAre => "who_you_are",
            Self::ExperienceSkills => "experience_skills",
            Self::Qualifications => "qualifications",
            Self::PreferredQualifications => "preferred_qualifications",
            Self::WhatWeOffer => "what_we_offer",
            Self::Benefits => "benefits",
            Self::ApplicationProcess => "application_process",
        }
    }

    /// The heading printed above the section.
    pub fn title(self) -> &'static str {
        match self {
            Self::CompanyOverview => "Company Overview",
            Self::RoleOverview => "Role Overview",
            Self::KeyResponsibilities => "Key Responsibilities",
            Self::TechnicalRequirements => "Technical Requirements",
            Self::WhoYouAre => "Who You Are",
            Self::ExperienceSkills => "Experience & Skills",
            Self::Qualifications => "Required Qualifications",
            Self::PreferredQualifications => "Preferred Qualifications",
            Self::WhatWeOffer => "What We Offer",
            Self::Benefits => "Benefits & Perks",
            Self::ApplicationProcess => "Application Process",
        }
    }
}

/// Labels for the metadata lines printed under the job title, in display order.
pub const METADATA_LABELS: [&str; 9] = [
    "Team",
    "Location",
    "Reporting To",
    "Employment Type",
    "Experience Required",
    "Salary Range",
    "Office Timings",
    "Working Days",
    "Work Schedule",
];

/// A job posting as returned by the content generator.
///
/// Unknown keys are ignored and every field defaults to [`Content::Empty`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub company_name: Content,
    pub job_title: Content,
    pub job_code: Content,
    pub location: Content,
    pub department: Content,
    pub team: Content,
    pub reporting_to: Content,
    pub employment_type: Content,
    pub experience_required: Content,
    pub salary_range: Content,
    pub office_timings: Content,
    pub working_days: Content,
    pub work_schedule: Content,
    pub industry_type: Content,
    pub company_website: Content,

    pub company_overview: Content,
    pub role_overview: Content,
    pub key_responsibilities: Content,
    pub technical_requirements: Content,
    pub who_you_are: Content,
    pub experience_skills: Content,
    pub qualifications: Content,
    pub preferred_qualifications: Content,
    pub what_we_offer: Content,
    pub benefits: Content,
    /// Older generator output used this key for benefits.
    pub compensation_benefits: Content,
    pub application_process: Content,
}

impl JobRecord {
    /// Parses a record from JSON text. The top-level value must be an object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(text)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Err(serde::de::Error::custom("expected a JSON object")),
        }
    }

    /// Returns the value of a body section.
    ///
    /// `Benefits` falls back to `compensation_benefits` when `benefits` itself has no content.
    pub fn section(&self, kind: SectionKind) -> &Content {
        match kind {
            SectionKind::CompanyOverview => &self.company_overview,
            SectionKind::RoleOverview => &self.role_overview,
            SectionKind::KeyResponsibilities => &self.key_responsibilities,
            SectionKind::TechnicalRequirements => &self.technical_requirements,
            SectionKind::WhoYouAre => &self.who_you_are,
            SectionKind::ExperienceSkills => &self.experience_skills,
            SectionKind::Qualifications => &self.qualifications,
            SectionKind::PreferredQualifications => &self.preferred_qualifications,
            SectionKind::WhatWeOffer => &self.what_we_offer,
            SectionKind::Benefits if self.benefits.has_content() => &self.benefits,
            SectionKind::Benefits => &self.compensation_benefits,
            SectionKind::ApplicationProcess => &self.application_process,
        }
    }

    /// Metadata values paired with [`METADATA_LABELS`], in display order.
    pub fn metadata(&self) -> impl Iterator<Item = (&'static str, &Content)> {
        METADATA_LABELS.into_iter().zip([
            &self.team,
            &self.location,
            &self.reporting_to,
            &self.employment_type,
            &self.experience_required,
            &self.salary_range,
            &self.office_timings,
            &self.working_days,
            &self.work_schedule,
        ])
    }

    /// The trimmed company name, if present.
    pub fn company_name(&self) -> Option<String> {
        self.company_name
            .has_content()
            .then(|| self.company_name.inline_text())
    }

    /// The trimmed company website, if present.
    pub fn company_website(&self) -> Option<String> {
        self.company_website
            .has_content()
            .then(|| self.company_website.inline_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_content_handles_every_shape() {
        assert!(!has_content(None));
        assert!(!Content::Empty.has_content());
        assert!(!Content::text("   \n\t").has_content());
        assert!(!Content::List(Vec::new()).has_content());
        assert!(!Content::list(["", "  "]).has_content());
        assert!(!Content::Map(Vec::new()).has_content());
        assert!(!Content::map([("a", Content::text(" ")), ("b", Content::List(vec![]))])
            .has_content());

        assert!(Content::text("x").has_content());
        assert!(Content::from(serde_json::json!(42)).has_content());
        assert!(Content::list(["", "item"]).has_content());
        assert!(Content::map([("nested", Content::list(["deep"]))]).has_content());
    }

    #[test]
    fn json_null_and_false_are_empty() {
        assert_eq!(Content::from(serde_json::json!(null)), Content::Empty);
        assert_eq!(Content::from(serde_json::json!(false)), Content::Empty);
        assert_eq!(Content::from(serde_json::json!(3.5)), Content::text("3.5"));
    }

    #[test]
    fn deserialize_ignores_unknown_keys_and_keeps_map_order() {
        let record = JobRecord::from_json(
            r#"{
                "job_title": "Backend Engineer",
                "unexpected": {"x": 1},
                "benefits": {"zeta": "last key first", "alpha": ["a", "b"]}
            }"#,
        )
        .expect("record parses");

        assert_eq!(record.job_title, Content::text("Backend Engineer"));
        assert_eq!(record.company_name, Content::Empty);
        match &record.benefits {
            Content::Map(entries) => {
                let keys: Vec<_> = entries.iter().map(|(key, _)| key.as_str()).collect();
                assert_eq!(keys, ["zeta", "alpha"]);
            }
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn benefits_fall_back_to_legacy_key() {
        let mut record = JobRecord {
            compensation_benefits: Content::list(["Health: full cover"]),
            ..JobRecord::default()
        };
        assert_eq!(
            record.section(SectionKind::Benefits),
            &record.compensation_benefits
        );

        record.benefits = Content::list(["Equity: yes"]);
        assert_eq!(record.section(SectionKind::Benefits), &record.benefits);
    }

    #[test]
    fn metadata_pairs_follow_label_order() {
        let record = JobRecord {
            team: Content::text("Platform"),
            work_schedule: Content::text("Hybrid"),
            ..JobRecord::default()
        };
        let pairs: Vec<_> = record.metadata().collect();
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs[0], ("Team", &Content::text("Platform")));
        assert_eq!(pairs[8], ("Work Schedule", &Content::text("Hybrid")));
        assert_eq!(pairs[1].0, "Location");
    }

    #[test]
    fn only_objects_parse_as_records() {
        assert!(JobRecord::from_json(r#"["Acme"]"#).is_err());
        assert!(JobRecord::from_json(r#""Acme""#).is_err());
        assert!(JobRecord::from_json("null").is_err());
        assert_eq!(JobRecord::from_json("{}").unwrap(), JobRecord::default());
    }

    #[test]
    fn saved_records_load_back_unchanged() {
        let record = JobRecord {
            company_name: Content::text("Acme"),
            benefits: Content::map([
                ("zeta", Content::list(["Health", "Dental"])),
                ("alpha", Content::text("Pension")),
            ]),
            ..JobRecord::default()
        };
        let json = serde_json::to_string(&record).expect("record serializes");
        assert_eq!(JobRecord::from_json(&json).expect("record parses"), record);
    }

    #[test]
    fn inline_text_joins_nested_values() {
        let value = Content::map([
            ("days", Content::list(["Mon", "", "Tue"])),
            ("note", Content::text(" flexible ")),
        ]);
        assert_eq!(value.inline_text(), "days: Mon, Tue; note: flexible");
    }
}
