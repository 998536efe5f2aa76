//! Document input model: projects, their photo sections, and the document snapshot
//! handed to the layout planner.
#![allow(dead_code)]

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::photo::Photo;

// ────────────────────────────────────────────────────────────────────────────
// Modes and section kinds
// ────────────────────────────────────────────────────────────────────────────

/// Per-project layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectMode {
    /// Two sections: before, after.
    #[default]
    BeforeAfter,
    /// Three sections: 0%, 50%, 100%.
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "after")]
    After,
    #[serde(rename = "0%")]
    ProgressStart,
    #[serde(rename = "50%")]
    ProgressHalf,
    #[serde(rename = "100%")]
    ProgressDone,
}

const BEFORE_AFTER_SECTIONS: [SectionKind; 2] = [SectionKind::Before, SectionKind::After];
const PROGRESS_SECTIONS: [SectionKind; 3] = [
    SectionKind::ProgressStart,
    SectionKind::ProgressHalf,
    SectionKind::ProgressDone,
];

impl SectionKind {
    /// Heading printed above the section's photo grid.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Before => "BEFORE (Sebelum)",
            SectionKind::After => "AFTER (Sesudah)",
            SectionKind::ProgressStart => "PROGRESS 0%",
            SectionKind::ProgressHalf => "PROGRESS 50%",
            SectionKind::ProgressDone => "PROGRESS 100%",
        }
    }

    /// Sections rendered for a mode, in document order.
    pub fn for_mode(mode: ProjectMode) -> &'static [SectionKind] {
        match mode {
            ProjectMode::BeforeAfter => &BEFORE_AFTER_SECTIONS,
            ProjectMode::Progress => &PROGRESS_SECTIONS,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Project
// ────────────────────────────────────────────────────────────────────────────

/// Progress photos keyed by completion level, matching the client's
/// `{"0%": [...], "50%": [...], "100%": [...]}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressPhotos {
    #[serde(rename = "0%", default)]
    pub start: Vec<Photo>,
    #[serde(rename = "50%", default)]
    pub half: Vec<Photo>,
    #[serde(rename = "100%", default)]
    pub done: Vec<Photo>,
}

/// A borrowed view of one section of a project.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub photos: &'a [Photo],
}

/// A photographed project.
///
/// Photos of both modes are kept; only the sections of the current `mode`
/// are rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: ProjectMode,
    #[serde(default)]
    pub before_photos: Vec<Photo>,
    #[serde(default)]
    pub after_photos: Vec<Photo>,
    #[serde(default)]
    pub progress_photos: ProgressPhotos,
}

impl Project {
    pub fn new(name: impl Into<String>, mode: ProjectMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
            ..Default::default()
        }
    }

    /// Title printed at the top of the project's first page.
    /// Blank names (empty or whitespace-only) fall back to `"<header_text> <index + 1>"`.
    pub fn display_title(&self, header_text: &str, index: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("{header_text} {}", index + 1)
        } else {
            name.to_string()
        }
    }

    pub fn photos(&self, kind: SectionKind) -> &[Photo] {
        match kind {
            SectionKind::Before => &self.before_photos,
            SectionKind::After => &self.after_photos,
            SectionKind::ProgressStart => &self.progress_photos.start,
            SectionKind::ProgressHalf => &self.progress_photos.half,
            SectionKind::ProgressDone => &self.progress_photos.done,
        }
    }

    fn photos_mut(&mut self, kind: SectionKind) -> &mut Vec<Photo> {
        match kind {
            SectionKind::Before => &mut self.before_photos,
            SectionKind::After => &mut self.after_photos,
            SectionKind::ProgressStart => &mut self.progress_photos.start,
            SectionKind::ProgressHalf => &mut self.progress_photos.half,
            SectionKind::ProgressDone => &mut self.progress_photos.done,
        }
    }

    /// Sections for the current mode, in order. Empty sections are included;
    /// the planner skips them.
    pub fn active_sections(&self) -> Vec<Section<'_>> {
        SectionKind::for_mode(self.mode)
            .iter()
            .map(|&kind| Section {
                kind,
                photos: self.photos(kind),
            })
            .collect()
    }

    pub fn add_photo(&mut self, kind: SectionKind, photo: Photo) {
        self.photos_mut(kind).push(photo);
    }

    /// Replaces the bytes of the photo with `photo_id`. Returns false if no such photo.
    pub fn replace_photo(&mut self, kind: SectionKind, photo_id: Uuid, data: Bytes) -> bool {
        match self.photos_mut(kind).iter_mut().find(|p| p.id == photo_id) {
            Some(photo) => {
                photo.replace_data(data);
                true
            }
            None => false,
        }
    }

    pub fn remove_photo(&mut self, kind: SectionKind, photo_id: Uuid) -> Option<Photo> {
        let photos = self.photos_mut(kind);
        let index = photos.iter().position(|p| p.id == photo_id)?;
        Some(photos.remove(index))
    }

    pub fn set_mode(&mut self, mode: ProjectMode) {
        self.mode = mode;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Immutable snapshot of everything the planner needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSpec {
    /// Header text: fallback project title prefix and output filename stem.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl DocumentSpec {
    pub fn photo_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| p.active_sections())
            .map(|s| s.photos.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str) -> Photo {
        Photo::new(name, vec![1u8, 2, 3])
    }

    #[test]
    fn test_active_sections_follow_mode() {
        let mut project = Project::new("Gedung A", ProjectMode::BeforeAfter);
        let kinds: Vec<_> = project.active_sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::Before, SectionKind::After]);

        project.set_mode(ProjectMode::Progress);
        let kinds: Vec<_> = project.active_sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::ProgressStart,
                SectionKind::ProgressHalf,
                SectionKind::ProgressDone
            ]
        );
    }

    #[test]
    fn test_switching_mode_keeps_other_mode_photos() {
        let mut project = Project::new("Gedung A", ProjectMode::BeforeAfter);
        project.add_photo(SectionKind::Before, photo("b.jpg"));
        project.set_mode(ProjectMode::Progress);
        project.add_photo(SectionKind::ProgressHalf, photo("p.jpg"));

        assert_eq!(project.before_photos.len(), 1);
        project.set_mode(ProjectMode::BeforeAfter);
        assert_eq!(project.active_sections()[0].photos.len(), 1);
        assert_eq!(project.progress_photos.half.len(), 1);
    }

    #[test]
    fn test_display_title_falls_back_to_header() {
        let named = Project::new("Lobby", ProjectMode::BeforeAfter);
        assert_eq!(named.display_title("PEKERJAAN", 0), "Lobby");

        let unnamed = Project::new("", ProjectMode::BeforeAfter);
        assert_eq!(unnamed.display_title("PEKERJAAN", 0), "PEKERJAAN 1");
    }

    #[test]
    fn test_display_title_treats_whitespace_name_as_blank() {
        let blank = Project::new("   ", ProjectMode::BeforeAfter);
        assert_eq!(blank.display_title("PEKERJAAN", 2), "PEKERJAAN 3");

        let padded = Project::new("  Lobby Utama ", ProjectMode::BeforeAfter);
        assert_eq!(padded.display_title("PEKERJAAN", 0), "Lobby Utama");
    }

    #[test]
    fn test_replace_and_remove_photo() {
        let mut project = Project::new("Lobby", ProjectMode::BeforeAfter);
        let p = photo("a.jpg");
        let id = p.id;
        project.add_photo(SectionKind::After, p);

        assert!(project.replace_photo(SectionKind::After, id, Bytes::from_static(b"xy")));
        assert_eq!(project.after_photos[0].size, 2);
        assert!(!project.replace_photo(SectionKind::Before, id, Bytes::new()));

        let removed = project.remove_photo(SectionKind::After, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(project.after_photos.is_empty());
        assert!(project.remove_photo(SectionKind::After, id).is_none());
    }

    #[test]
    fn test_project_deserializes_client_shape() {
        let json = r#"{
            "name": "Proyek 1",
            "mode": "progress",
            "progressPhotos": { "50%": [ { "name": "x.jpg", "data": "AQID" } ] }
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.mode, ProjectMode::Progress);
        assert_eq!(project.progress_photos.half.len(), 1);
        assert!(project.before_photos.is_empty());
    }

    #[test]
    fn test_photo_count_ignores_inactive_mode() {
        let mut project = Project::new("Lobby", ProjectMode::Progress);
        project.add_photo(SectionKind::Before, photo("b.jpg"));
        project.add_photo(SectionKind::ProgressDone, photo("d.jpg"));
        let spec = DocumentSpec {
            title: "PEKERJAAN".to_string(),
            subtitle: String::new(),
            projects: vec![project],
        };
        assert_eq!(spec.photo_count(), 1);
    }
}
