//! Default classification of manifest paths as license files.

use crate::model::{CoordinateType, Coordinates};
use crate::traits::LicenseFileClassifier;

const LICENSE_FILE_STEMS: &[&str] = &[
    "license",
    "licence",
    "unlicense",
    "unlicence",
    "copying",
    "copyright",
];
const LICENSE_FILE_EXTENSIONS: &[&str] = &["", ".txt", ".md", ".html", ".rst"];

/// Recognises well-known license file names at the package root or at the
/// location each ecosystem packs its sources under (`package/` for npm,
/// `meta-inf/` for maven, `<name>-<revision>/` for pypi, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLicenseFileClassifier;

impl DefaultLicenseFileClassifier {
    pub fn new() -> Self {
        Self
    }

    fn is_license_file_name(name: &str) -> bool {
        LICENSE_FILE_STEMS.iter().any(|stem| {
            name.strip_prefix(stem)
                .map_or(false, |rest| LICENSE_FILE_EXTENSIONS.contains(&rest))
        })
    }

    fn license_locations(coordinates: &Coordinates) -> Vec<String> {
        let mut locations = match coordinates.coordinate_type {
            CoordinateType::Npm => vec!["package/".to_string()],
            CoordinateType::Maven | CoordinateType::SourceArchive => vec!["meta-inf/".to_string()],
            CoordinateType::Pypi => {
                vec![format!("{}-{}/", coordinates.name, coordinates.revision)]
            }
            CoordinateType::Go => match &coordinates.namespace {
                Some(namespace) => vec![format!(
                    "{}/{}@{}/",
                    namespace, coordinates.name, coordinates.revision
                )],
                None => vec![format!("{}@{}/", coordinates.name, coordinates.revision)],
            },
            _ => Vec::new(),
        };
        locations.push(String::new());
        locations
    }
}

impl LicenseFileClassifier for DefaultLicenseFileClassifier {
    fn is_license_file(&self, path: &str, coordinates: &Coordinates) -> bool {
        if path.is_empty() {
            return false;
        }
        let path = path.to_lowercase();

        let first_segment = path.split('/').next().unwrap_or_default();
        if Self::is_license_file_name(first_segment) {
            return true;
        }

        Self::license_locations(coordinates).iter().any(|location| {
            path.strip_prefix(&location.to_lowercase())
                .map_or(false, Self::is_license_file_name)
        })
    }
}
