//! Resume location checks.

use reqwest::Url;

use crate::models::application::NO_RESUME;

/// Hosts the portal uploads resumes to. Matched as a substring of the host.
const STORAGE_HOSTS: &[&str] = &[
    "cloudinary",
    "amazonaws.com",
    "storage.googleapis.com",
    "firebasestorage",
    "blob.core.windows.net",
    "utfs.io",
    "uploadthing",
    "drive.google.com",
    "dropbox",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt", ".rtf"];

const SENTINELS: &[&str] = &[NO_RESUME, "ERROR"];

/// True when `url` is http(s) and points at known storage or a document file.
pub fn is_valid_resume_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || SENTINELS.contains(&url) {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let path = parsed.path().to_lowercase();
    STORAGE_HOSTS.iter().any(|h| host.contains(h))
        || DOCUMENT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// The stored URL when usable, otherwise the profile URL when usable.
pub fn choose_resume_url<'a>(
    stored: Option<&'a str>,
    profile: Option<&'a str>,
) -> Option<ResumeSource<'a>> {
    if let Some(url) = stored.filter(|u| is_valid_resume_url(u)) {
        return Some(ResumeSource::Application(url));
    }
    profile
        .filter(|u| is_valid_resume_url(u))
        .map(ResumeSource::Profile)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource<'a> {
    Application(&'a str),
    Profile(&'a str),
}

impl<'a> ResumeSource<'a> {
    pub fn url(self) -> &'a str {
        match self {
            ResumeSource::Application(url) | ResumeSource::Profile(url) => url,
        }
    }
}
