//! Font discovery for the job description renderer.
//!
//! A bundled Roboto family is preferred.  When it is not installed the loader falls back to the
//! first sans-serif family found in the usual system font directories.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

/// File names of one system font family.
struct SystemFamily {
    name: &'static str,
    directories: &'static [&'static str],
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const SYSTEM_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "Liberation Sans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/TTF",
        ],
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
    SystemFamily {
        name: "DejaVu Sans",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu-sans-fonts",
            "/usr/share/fonts/TTF",
        ],
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    SystemFamily {
        name: "Arial",
        directories: &["/System/Library/Fonts/Supplemental", "/Library/Fonts"],
        regular: "Arial.ttf",
        bold: "Arial Bold.ttf",
        italic: "Arial Italic.ttf",
        bold_italic: "Arial Bold Italic.ttf",
    },
];

const WINDOWS_FAMILY: SystemFamily = SystemFamily {
    name: "Arial",
    directories: &[],
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn font_directory_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = configured.filter(|path| !path.as_os_str().is_empty()) {
        candidates.push(path.to_path_buf());
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(configured: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(configured) {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate bundled font directory. Checked: {}. See assets/fonts/README.md or set JOB_PDF_FONTS_DIR.",
            summary
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_bundled_font_family(configured: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(configured)?;
    debug!("Loading {} fonts from {}", DEFAULT_FONT_FAMILY_NAME, directory.display());

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load default font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    for var in ["WINDIR", "SystemRoot"] {
        if let Some(root) = env_path(var) {
            let candidate = root.join("Fonts");
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
    }
    None
}

impl SystemFamily {
    fn files(&self) -> [&'static str; 4] {
        [self.regular, self.bold, self.italic, self.bold_italic]
    }

    fn is_complete_in(&self, directory: &Path) -> bool {
        self.files().iter().all(|file| directory.join(file).is_file())
    }

    fn load_from(&self, directory: &Path) -> Result<FontFamily<FontData>, Error> {
        let load = |file: &str| {
            let path = directory.join(file);
            FontData::load(&path, None).map_err(|err| {
                Error::new(
                    format!(
                        "Failed to load fallback '{}' font at {}: {}",
                        self.name,
                        path.display(),
                        err
                    ),
                    io::Error::new(io::ErrorKind::Other, err.to_string()),
                )
            })
        };

        Ok(FontFamily {
            regular: load(self.regular)?,
            bold: load(self.bold)?,
            italic: load(self.italic)?,
            bold_italic: load(self.bold_italic)?,
        })
    }
}

/// System directories and families to try, in order.
fn system_candidates() -> Vec<(PathBuf, &'static SystemFamily)> {
    let mut candidates: Vec<(PathBuf, &'static SystemFamily)> = SYSTEM_FAMILIES
        .iter()
        .flat_map(|family| {
            family
                .directories
                .iter()
                .map(move |directory| (PathBuf::from(directory), family))
        })
        .collect();

    if let Some(directory) = windows_font_directory() {
        candidates.push((directory, &WINDOWS_FAMILY));
    }

    candidates
}

fn system_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let (directory, family) = system_candidates()
        .into_iter()
        .find(|(directory, family)| family.is_complete_in(directory))
        .ok_or_else(|| {
            Error::new(
                "No system sans-serif font family found (tried Liberation Sans, DejaVu Sans and Arial)",
                io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
            )
        })?;

    debug!("Loading fallback '{}' fonts from {}", family.name, directory.display());
    family.load_from(&directory)
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto font family if available and falls back to a system sans-serif
/// family when the bundled fonts are missing.
///
/// `configured` is searched before the directories next to the executable and in the crate.
pub fn default_font_family(configured: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    match load_bundled_font_family(configured) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_fallback_font_family() {
            Ok(fallback) => {
                warn!("Bundled fonts unavailable ({}); using a system font family.", err);
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Bundled fonts unavailable ({}); system fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "Bundled fonts unavailable and system fallback failed: {}",
                        fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether any usable font family is present on disk.
pub fn default_fonts_available(configured: Option<&Path>) -> bool {
    resolve_font_directory(configured).is_ok()
        || system_candidates()
            .iter()
            .any(|(directory, family)| family.is_complete_in(directory))
}
