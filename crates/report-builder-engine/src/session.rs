use chrono::{DateTime, Local, Utc};

use crate::editing::{Cmd, EditError, Patch, Report};
use crate::project::{DEFAULT_THEME, ProjectError, ProjectFile, check_file_name, project_file_name};
use crate::render::{self, EXPORT_FILE_NAME, RenderModel};

/// Question asked before a load discards the current blocks
pub const LOAD_CONFIRMATION: &str = "¿Estás seguro de cargar este proyecto?\n\n\
     Se perderá el trabajo actual no guardado.\n\n\
     Recomendación: Guarda tu proyecto actual antes de continuar.";

/// Serialized project ready to hand to a download / write capability
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProject {
    pub file_name: String,
    pub json: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedText {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { blocks: usize, theme: String },
    /// The user declined to discard the current blocks
    Cancelled,
}

/// One editing session: the report plus the state a host needs around it
#[derive(Debug, Clone)]
pub struct Session {
    report: Report,
    theme: String,
    /// Set by edits, cleared by save and load
    dirty: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Session {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            report: Report::new(),
            theme: theme.into(),
            dirty: false,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let patch = self.report.apply(cmd)?;
        self.dirty |= patch.changed;
        Ok(patch)
    }

    pub fn preview(&self) -> RenderModel {
        render::preview(&self.report)
    }

    /// Preview rendered as escaped HTML for a browser host
    pub fn html(&self) -> String {
        render::render_html(&self.preview())
    }

    pub fn export_text(&self) -> ExportedText {
        ExportedText {
            file_name: EXPORT_FILE_NAME.to_string(),
            text: render::export_text(&self.report),
        }
    }

    /// Serialize the whole session as a project file
    pub fn save_project(&mut self, now: DateTime<Local>) -> Result<SavedProject, ProjectError> {
        let file = ProjectFile::new(
            self.report.blocks().to_vec(),
            &self.theme,
            now.with_timezone(&Utc),
        );
        let saved = SavedProject {
            file_name: project_file_name(now),
            json: file.to_json()?,
        };
        log::info!(
            "Project saved as {} ({} blocks)",
            saved.file_name,
            self.report.len()
        );
        self.dirty = false;
        Ok(saved)
    }

    /// Replace the report with a project file's blocks.
    ///
    /// The file is fully validated before anything changes. When blocks
    /// already exist `confirm` is asked first; declining leaves the session
    /// untouched.
    pub fn load_project<F>(
        &mut self,
        file_name: &str,
        text: &str,
        confirm: F,
    ) -> Result<LoadOutcome, ProjectError>
    where
        F: FnOnce(&str) -> bool,
    {
        check_file_name(file_name)?;
        let file = ProjectFile::parse(text)?;

        if !self.report.is_empty() && !confirm(LOAD_CONFIRMATION) {
            return Ok(LoadOutcome::Cancelled);
        }

        let blocks = file.report_data.len();
        self.report = Report::from_blocks(file.report_data);
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        self.dirty = false;

        log::info!(
            "Project loaded: version {:?}, saved {:?}, {blocks} blocks",
            file.version,
            file.timestamp
        );
        Ok(LoadOutcome::Loaded {
            blocks,
            theme: self.theme.clone(),
        })
    }
}
