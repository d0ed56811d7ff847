//! Session classification and per-person reshaping.
//!
//! Records are collected once and then read by three independent filters.
//! Oral and poster membership are mutually exclusive (they differ only in
//! whether chairs are present); panel membership is evaluated on its own and
//! may overlap either of them.

use serde::{Deserialize, Serialize};

use crate::gender::{GenderDetector, GenderLabel};
use crate::normalize::normalize_name;
use crate::record::{NOT_AVAILABLE, SessionRecord, split_list};

/// One row per (session, presenter) in the oral and poster tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OralPosterEntry {
    pub presenter: String,
    pub chair1: String,
    pub chair2: String,
    pub title: String,
    pub presenter_gender: GenderLabel,
    pub chair1_gender: GenderLabel,
    pub chair2_gender: GenderLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRole {
    Speaker,
    Moderator,
    Panelist,
}

impl PanelRole {
    pub const ALL: [Self; 3] = [Self::Speaker, Self::Moderator, Self::Panelist];

    fn names(self, record: &SessionRecord) -> String {
        match self {
            Self::Speaker => record.speakers_joined(),
            Self::Moderator => record.moderators_joined(),
            Self::Panelist => record.panelists_joined(),
        }
    }
}

/// One row per (session, role, name) in the panel table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRoleEntry {
    pub name: String,
    pub role: PanelRole,
    pub title: String,
    pub gender: GenderLabel,
}

fn chairs_missing(record: &SessionRecord) -> bool {
    let chairs = record.chairs_joined();
    let chairs = chairs.trim();
    chairs.is_empty() || chairs.eq_ignore_ascii_case(NOT_AVAILABLE)
}

fn has_presenters(record: &SessionRecord) -> bool {
    !record.presenters_joined().trim().is_empty()
}

/// Chaired session with at least one presenter.
#[must_use]
pub fn is_oral(record: &SessionRecord) -> bool {
    has_presenters(record) && !chairs_missing(record)
}

/// Unchaired (or `N/A` chaired) session with at least one presenter.
#[must_use]
pub fn is_poster(record: &SessionRecord) -> bool {
    has_presenters(record) && chairs_missing(record)
}

/// Session listing any speaker, moderator or panel member.
#[must_use]
pub fn is_panel(record: &SessionRecord) -> bool {
    [
        record.speakers_joined(),
        record.moderators_joined(),
        record.panelists_joined(),
    ]
    .iter()
    .any(|names| !names.trim().is_empty())
}

/// The full batch of extracted records, fixed once collection finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedSessions {
    records: Vec<SessionRecord>,
}

impl CollectedSessions {
    #[must_use]
    pub const fn new(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }

    #[must_use]
    pub fn oral(&self) -> Vec<&SessionRecord> {
        self.records.iter().filter(|r| is_oral(r)).collect()
    }

    #[must_use]
    pub fn poster(&self) -> Vec<&SessionRecord> {
        self.records.iter().filter(|r| is_poster(r)).collect()
    }

    #[must_use]
    pub fn panel(&self) -> Vec<&SessionRecord> {
        self.records.iter().filter(|r| is_panel(r)).collect()
    }

    /// Build all three category tables.
    #[must_use]
    pub fn reshape(&self, detector: &GenderDetector) -> ReshapedTables {
        ReshapedTables {
            oral: reshape_pairwise(&self.oral(), detector),
            poster: reshape_pairwise(&self.poster(), detector),
            panel: reshape_panel(&self.panel(), detector),
        }
    }
}

impl From<Vec<SessionRecord>> for CollectedSessions {
    fn from(records: Vec<SessionRecord>) -> Self {
        Self::new(records)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReshapedTables {
    pub oral: Vec<OralPosterEntry>,
    pub poster: Vec<OralPosterEntry>,
    pub panel: Vec<PersonRoleEntry>,
}

/// First two chairs; a missing or blank slot becomes `N/A`.
fn chair_slots(record: &SessionRecord) -> (String, String) {
    let mut chairs = record
        .chairs
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty());
    let mut slot = || chairs.next().unwrap_or(NOT_AVAILABLE).to_string();
    let first = slot();
    let second = slot();
    (first, second)
}

/// One row per presenter, each carrying the session's fixed chair pair.
#[must_use]
pub fn reshape_pairwise(
    records: &[&SessionRecord],
    detector: &GenderDetector,
) -> Vec<OralPosterEntry> {
    let mut rows = Vec::new();

    for record in records {
        let (chair1, chair2) = chair_slots(record);
        let chair1 = normalize_name(&chair1);
        let chair2 = normalize_name(&chair2);
        let chair1_gender = detector.infer_gender(&chair1);
        let chair2_gender = detector.infer_gender(&chair2);

        for presenter in &record.presenters {
            let presenter = normalize_name(presenter);
            if presenter.trim().is_empty() {
                continue;
            }

            rows.push(OralPosterEntry {
                presenter_gender: detector.infer_gender(&presenter),
                presenter,
                chair1: chair1.clone(),
                chair2: chair2.clone(),
                title: record.title.clone(),
                chair1_gender,
                chair2_gender,
            });
        }
    }

    rows
}

/// One row per named speaker, moderator and panel member.
#[must_use]
pub fn reshape_panel(records: &[&SessionRecord], detector: &GenderDetector) -> Vec<PersonRoleEntry> {
    let mut rows = Vec::new();

    for record in records {
        for role in PanelRole::ALL {
            for name in split_list(&role.names(record)) {
                let name = normalize_name(&name);
                if name.is_empty() {
                    continue;
                }

                rows.push(PersonRoleEntry {
                    gender: detector.infer_gender(&name),
                    name,
                    role,
                    title: record.title.clone(),
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GenderDetector {
        let Ok(detector) = GenderDetector::bundled() else {
            panic!("bundled dictionary should parse");
        };
        detector
    }

    fn record(id: &str, chairs: &[&str], presenters: &[&str]) -> SessionRecord {
        let mut record = SessionRecord::error(id);
        record.title = format!("Session {id}");
        record.chairs = chairs.iter().map(ToString::to_string).collect();
        record.presenters = presenters.iter().map(ToString::to_string).collect();
        record
    }

    #[test]
    fn test_oral_and_poster_are_exclusive() {
        let records = [
            record("oral", &["Jane Doe"], &["John Smith"]),
            record("poster-na", &["N/A"], &["John Smith"]),
            record("poster-empty", &[], &["John Smith"]),
            record("no-presenters", &["Jane Doe"], &[]),
        ];
        for r in &records {
            assert!(!(is_oral(r) && is_poster(r)), "{} in both", r.session_id);
        }
        assert!(is_oral(&records[0]));
        assert!(is_poster(&records[1]));
        assert!(is_poster(&records[2]));
        assert!(!is_oral(&records[3]) && !is_poster(&records[3]));
    }

    #[test]
    fn test_error_record_is_excluded_everywhere() {
        let error = SessionRecord::error("broken");
        assert!(!is_oral(&error));
        assert!(!is_poster(&error));
        assert!(!is_panel(&error));
    }

    #[test]
    fn test_panel_may_overlap_oral() {
        let mut r = record("mixed", &["Jane Doe"], &["John Smith"]);
        r.moderators = vec!["Ana Lopez".into()];
        let collected = CollectedSessions::new(vec![r]);
        assert_eq!(collected.oral().len(), 1);
        assert_eq!(collected.panel().len(), 1);
        assert!(collected.poster().is_empty());
    }

    #[test]
    fn test_pairwise_expands_presenters_against_chairs() {
        let r = record(
            "s1",
            &["Dr. Jane Doe2", "John Smith", "Extra Chair"],
            &["Alice Brown", "Prof. Peter Green1"],
        );
        let rows = reshape_pairwise(&[&r], &detector());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].presenter, "Alice Brown");
        assert_eq!(rows[1].presenter, "Peter Green");
        for row in &rows {
            assert_eq!(row.chair1, "Jane Doe");
            assert_eq!(row.chair2, "John Smith");
            assert_eq!(row.title, "Session s1");
            assert_eq!(row.chair1_gender, GenderLabel::Female);
            assert_eq!(row.chair2_gender, GenderLabel::Male);
        }
        assert_eq!(rows[0].presenter_gender, GenderLabel::Female);
        assert_eq!(rows[1].presenter_gender, GenderLabel::Male);
    }

    #[test]
    fn test_pairwise_fills_missing_chairs() {
        let r = record("p1", &["N/A"], &["Maria Rossi"]);
        let rows = reshape_pairwise(&[&r], &detector());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].chair1, "N/A");
        assert_eq!(rows[0].chair2, "N/A");
        assert_eq!(rows[0].chair1_gender, GenderLabel::Unknown);
        assert_eq!(rows[0].chair2_gender, GenderLabel::Unknown);

        let r = record("p2", &[], &["Maria Rossi"]);
        let rows = reshape_pairwise(&[&r], &detector());
        assert_eq!(rows[0].chair1, "N/A");
        assert_eq!(rows[0].chair2, "N/A");
    }

    #[test]
    fn test_pairwise_drops_empty_presenters() {
        let r = record("s2", &["Jane Doe"], &["", "42", "  ", "Tom Baker"]);
        let rows = reshape_pairwise(&[&r], &detector());
        let presenters: Vec<_> = rows.iter().map(|r| r.presenter.as_str()).collect();
        assert_eq!(presenters, vec!["Tom Baker"]);
    }

    #[test]
    fn test_panel_rows_in_role_order() {
        let mut r = record("panel", &[], &[]);
        r.speakers = vec!["Dr. Emma Stone".into(), "Luca Bianchi".into()];
        r.moderators = vec!["Jane Doe1".into()];
        r.panelists = vec!["Pauley Lee".into(), "  ".into()];
        let rows = reshape_panel(&[&r], &detector());

        let summary: Vec<_> = rows
            .iter()
            .map(|e| (e.name.as_str(), e.role, e.gender))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Emma Stone", PanelRole::Speaker, GenderLabel::Female),
                ("Luca Bianchi", PanelRole::Speaker, GenderLabel::Male),
                ("Jane Doe", PanelRole::Moderator, GenderLabel::Female),
                ("Pauley Lee", PanelRole::Panelist, GenderLabel::Andy),
            ]
        );
        assert!(rows.iter().all(|e| e.title == "Session panel"));
    }

    #[test]
    fn test_reshape_builds_all_tables() {
        let mut panel = record("panel", &[], &[]);
        panel.speakers = vec!["Anna Berg".into()];
        let collected = CollectedSessions::from(vec![
            record("oral", &["Jane Doe"], &["Paul Klee", "Eva Green"]),
            record("poster", &["N/A"], &["Hans Meier"]),
            panel,
            SessionRecord::error("failed"),
        ]);
        let tables = collected.reshape(&detector());
        assert_eq!(tables.oral.len(), 2);
        assert_eq!(tables.poster.len(), 1);
        assert_eq!(tables.panel.len(), 1);
        assert_eq!(collected.error_count(), 1);
    }
}
