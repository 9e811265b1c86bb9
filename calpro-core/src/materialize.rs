//! Open a dated note, creating it (and its folders) first if needed.

use chrono::NaiveDate;

use crate::error::CalProResult;
use crate::host::{Entry, Host};
use crate::kind::NoteKind;
use crate::resolver::{NotePath, join_path, resolve_note_path, template_candidates};
use crate::settings::Settings;

/// A note to open or create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub folder: String,
    pub stem: String,
    pub template: Option<String>,
}

impl NoteRequest {
    pub fn for_note(note: &NotePath, settings: &Settings) -> Self {
        NoteRequest {
            folder: note.folder.clone(),
            stem: note.stem.clone(),
            template: settings.note(note.kind).template().map(str::to_string),
        }
    }

    pub fn path(&self) -> String {
        join_path(&[self.folder.as_str(), format!("{}.md", self.stem).as_str()])
    }
}

/// What happened to the template when a note was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateUse {
    None,
    /// Content was copied from this template path.
    Copied(String),
    /// The configured template did not resolve to a file.
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The note already existed and was opened.
    Opened(String),
    /// The note was created, then opened.
    Created { path: String, template: TemplateUse },
    /// Creation was not confirmed; nothing was written.
    Declined(String),
}

impl Materialized {
    pub fn path(&self) -> &str {
        match self {
            Materialized::Opened(path) | Materialized::Declined(path) => path,
            Materialized::Created { path, .. } => path,
        }
    }

    pub fn missing_template(&self) -> Option<&str> {
        match self {
            Materialized::Created {
                template: TemplateUse::Missing(template),
                ..
            } => Some(template),
            _ => None,
        }
    }
}

/// Open the note described by `request`, creating it first if it is absent.
///
/// `confirm` is asked once, with the note path, before anything is created.
/// A missing template is logged and reported through the result; every other
/// host failure is returned as-is.
pub async fn materialize<H, F>(
    host: &H,
    request: &NoteRequest,
    confirm: F,
) -> CalProResult<Materialized>
where
    H: Host + ?Sized,
    F: FnOnce(&str) -> bool,
{
    let path = request.path();

    let folder_exists = request.folder.is_empty() || host.exists(&request.folder).await?;

    if folder_exists && host.lookup(&path).await?.is_some() {
        log::debug!("opening existing note {}", path);
        host.open(&path).await?;
        return Ok(Materialized::Opened(path));
    }

    if !confirm(&path) {
        log::debug!("creation of {} declined", path);
        return Ok(Materialized::Declined(path));
    }

    if !folder_exists {
        create_folders(host, &request.folder).await?;
    }

    let (content, template) = match request.template.as_deref() {
        Some(template) => load_template(host, template).await?,
        None => (String::new(), TemplateUse::None),
    };

    log::debug!("creating note {}", path);
    host.create(&path, &content).await?;
    host.open(&path).await?;

    Ok(Materialized::Created { path, template })
}

/// Create `folder` and any missing ancestors, outermost first.
async fn create_folders<H: Host + ?Sized>(host: &H, folder: &str) -> CalProResult<()> {
    let mut current = String::new();

    for segment in folder.split('/').filter(|s| !s.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);

        if !host.exists(&current).await? {
            log::debug!("creating folder {}", current);
            host.create_folder(&current).await?;
        }
    }

    Ok(())
}

async fn load_template<H: Host + ?Sized>(
    host: &H,
    template: &str,
) -> CalProResult<(String, TemplateUse)> {
    for candidate in template_candidates(template) {
        if let Some(entry @ Entry::File(_)) = host.lookup(&candidate).await? {
            let content = host.read(&entry).await?;
            return Ok((content, TemplateUse::Copied(candidate)));
        }
    }

    log::debug!("Template: {} not found", template);
    Ok((String::new(), TemplateUse::Missing(template.to_string())))
}

/// Resolve the note for `kind` on `date` and open it, creating it if needed.
///
/// `confirm` is only consulted when `showConfirmBeforeCreate` is set.
pub async fn open_note<H, F>(
    host: &H,
    settings: &Settings,
    kind: NoteKind,
    date: NaiveDate,
    confirm: F,
) -> CalProResult<Materialized>
where
    H: Host + ?Sized,
    F: FnOnce(&str) -> bool,
{
    let note = resolve_note_path(date, kind, settings)?;
    let request = NoteRequest::for_note(&note, settings);

    if settings.show_confirm_before_create {
        materialize(host, &request, confirm).await
    } else {
        materialize(host, &request, |_| true).await
    }
}

/// Ask the host to preview the note for `kind` on `date`.
pub async fn preview_note<H: Host + ?Sized>(
    host: &H,
    settings: &Settings,
    kind: NoteKind,
    date: NaiveDate,
) -> CalProResult<NotePath> {
    let note = resolve_note_path(date, kind, settings)?;
    host.emit_hover_preview(&note.path()).await?;
    Ok(note)
}
