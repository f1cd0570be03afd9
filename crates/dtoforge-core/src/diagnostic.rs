use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

///
/// DiagnosticKind
///
/// Stable classification, one code per kind. Errors exclude the carrying
/// model from synthesis; warnings ride along as data.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum DiagnosticKind {
    CircularReference,
    DuplicateName,
    InvalidConfiguration,
    InvalidPropertyType,
    MissingMarker,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingMarker => "DTO001",
            Self::InvalidConfiguration => "DTO002",
            Self::DuplicateName => "DTO003",
            Self::InvalidPropertyType => "DTO004",
            Self::CircularReference => "DTO005",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingMarker | Self::InvalidConfiguration | Self::DuplicateName => {
                Severity::Error
            }
            Self::InvalidPropertyType | Self::CircularReference => Severity::Warning,
        }
    }
}

///
/// Location
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Location {
    pub type_path: String,
    pub property: Option<String>,
}

impl Location {
    pub fn ty(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            property: None,
        }
    }

    pub fn property(type_path: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            property: Some(property.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}.{property}", self.type_path),
            None => write!(f, "{}", self.type_path),
        }
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            location,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity,
            self.kind.code(),
            self.location,
            self.message
        )
    }
}

/// Whether any diagnostic in the slice blocks synthesis.
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

///
/// Emitter
///
/// Per-type collector used during resolution. Classifies by kind on the way
/// in and decides, at the end, whether the model may proceed to synthesis.
///

#[derive(Debug)]
pub struct Emitter {
    type_path: String,
    diagnostics: Vec<Diagnostic>,
}

impl Emitter {
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn emit(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::new(kind, Location::ty(&self.type_path), message));
    }

    pub fn emit_property(
        &mut self,
        kind: DiagnosticKind,
        property: &str,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic::new(
            kind,
            Location::property(&self.type_path, property),
            message,
        ));
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_carry_stable_codes_and_severities() {
        assert_eq!(DiagnosticKind::MissingMarker.code(), "DTO001");
        assert_eq!(DiagnosticKind::InvalidConfiguration.code(), "DTO002");
        assert_eq!(DiagnosticKind::DuplicateName.code(), "DTO003");
        assert_eq!(DiagnosticKind::InvalidPropertyType.code(), "DTO004");
        assert_eq!(DiagnosticKind::CircularReference.code(), "DTO005");

        assert_eq!(DiagnosticKind::MissingMarker.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::DuplicateName.severity(), Severity::Error);
        assert_eq!(
            DiagnosticKind::InvalidConfiguration.severity(),
            Severity::Error
        );
        assert_eq!(
            DiagnosticKind::InvalidPropertyType.severity(),
            Severity::Warning
        );
        assert_eq!(
            DiagnosticKind::CircularReference.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn emitter_aggregates_and_classifies() {
        let mut emitter = Emitter::new("t::Customer");
        emitter.emit_property(DiagnosticKind::InvalidPropertyType, "raw", "unsupported");
        assert!(!emitter.has_errors());

        emitter.emit(DiagnosticKind::DuplicateName, "collides with t::CustomerDto");
        assert!(emitter.has_errors());

        let diagnostics = emitter.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].location.to_string(), "t::Customer.raw");
        assert_eq!(diagnostics[1].location.to_string(), "t::Customer");
    }

    #[test]
    fn display_includes_code_and_location() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::MissingMarker,
            Location::ty("t::Orphan"),
            "type 'Orphan' has no dto marker",
        );
        assert_eq!(
            diagnostic.to_string(),
            "Error [DTO001] t::Orphan: type 'Orphan' has no dto marker"
        );
    }
}
