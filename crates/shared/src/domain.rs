use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid contest type '{0}'")]
    InvalidContestType(String),
    #[error("invalid problem id '{0}'")]
    InvalidProblemId(String),
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestType {
    #[default]
    #[serde(rename = "ABC", alias = "abc")]
    Abc,
    #[serde(rename = "ARC", alias = "arc")]
    Arc,
    #[serde(rename = "AGC", alias = "agc")]
    Agc,
}

impl ContestType {
    pub const ALL: [ContestType; 3] = [ContestType::Abc, ContestType::Arc, ContestType::Agc];

    pub fn as_str(self) -> &'static str {
        match self {
            ContestType::Abc => "ABC",
            ContestType::Arc => "ARC",
            ContestType::Agc => "AGC",
        }
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ABC" => Ok(ContestType::Abc),
            "ARC" => Ok(ContestType::Arc),
            "AGC" => Ok(ContestType::Agc),
            _ => Err(DomainError::InvalidContestType(s.to_string())),
        }
    }
}

/// Position of a problem within a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProblemId {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(alias = "d")]
    D,
    #[serde(alias = "e")]
    E,
    #[serde(alias = "f")]
    F,
    #[serde(alias = "g")]
    G,
    #[serde(alias = "h")]
    H,
    #[serde(alias = "EX", alias = "ex")]
    Ex,
}

impl ProblemId {
    pub const ALL: [ProblemId; 9] = [
        ProblemId::A,
        ProblemId::B,
        ProblemId::C,
        ProblemId::D,
        ProblemId::E,
        ProblemId::F,
        ProblemId::G,
        ProblemId::H,
        ProblemId::Ex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProblemId::A => "A",
            ProblemId::B => "B",
            ProblemId::C => "C",
            ProblemId::D => "D",
            ProblemId::E => "E",
            ProblemId::F => "F",
            ProblemId::G => "G",
            ProblemId::H => "H",
            ProblemId::Ex => "Ex",
        }
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ProblemId::ALL
            .into_iter()
            .find(|id| id.as_str().to_ascii_uppercase() == normalized)
            .ok_or_else(|| DomainError::InvalidProblemId(s.to_string()))
    }
}

/// Problem-type filter: at most [`ProblemSelection::MAX_SELECTED`] distinct ids.
///
/// Construction is the selection boundary. Extra ids past the cap are dropped
/// in input order, so an over-long selection never reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProblemSelection(Vec<ProblemId>);

impl ProblemSelection {
    pub const MAX_SELECTED: usize = 3;

    pub fn new(ids: impl IntoIterator<Item = ProblemId>) -> Self {
        let mut selected = Vec::with_capacity(Self::MAX_SELECTED);
        for id in ids {
            if selected.len() == Self::MAX_SELECTED {
                break;
            }
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        Self(selected)
    }

    /// Parses user-facing labels; fails on the first unknown label.
    pub fn parse<S: AsRef<str>>(labels: &[S]) -> Result<Self, DomainError> {
        let ids = labels
            .iter()
            .map(|label| label.as_ref().parse::<ProblemId>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ids))
    }

    pub fn ids(&self) -> &[ProblemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProblemSelection {
    fn default() -> Self {
        Self::new([ProblemId::A, ProblemId::B, ProblemId::C])
    }
}

impl From<Vec<ProblemId>> for ProblemSelection {
    fn from(ids: Vec<ProblemId>) -> Self {
        Self::new(ids)
    }
}

impl<const N: usize> From<[ProblemId; N]> for ProblemSelection {
    fn from(ids: [ProblemId; N]) -> Self {
        Self::new(ids)
    }
}

impl<'de> Deserialize<'de> for ProblemSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<ProblemId>::deserialize(deserializer)?;
        Ok(Self::new(ids))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    #[default]
    Cpp,
    Dart,
    Elixir,
    Fortran,
    #[serde(rename = "f#")]
    FSharp,
    Go,
    Haskell,
    Julia,
    Kotlin,
    #[serde(rename = "ocaml")]
    OCaml,
    Python,
    Rust,
    Swift,
    Zig,
}

impl Language {
    pub const CATALOG: [Language; 15] = [
        Language::C,
        Language::Cpp,
        Language::Dart,
        Language::Elixir,
        Language::Fortran,
        Language::FSharp,
        Language::Go,
        Language::Haskell,
        Language::Julia,
        Language::Kotlin,
        Language::OCaml,
        Language::Python,
        Language::Rust,
        Language::Swift,
        Language::Zig,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Dart => "dart",
            Language::Elixir => "elixir",
            Language::Fortran => "fortran",
            Language::FSharp => "f#",
            Language::Go => "go",
            Language::Haskell => "haskell",
            Language::Julia => "julia",
            Language::Kotlin => "kotlin",
            Language::OCaml => "ocaml",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Swift => "swift",
            Language::Zig => "zig",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Dart => "Dart",
            Language::Elixir => "Elixir",
            Language::Fortran => "Fortran",
            Language::FSharp => "F#",
            Language::Go => "Go",
            Language::Haskell => "Haskell",
            Language::Julia => "Julia",
            Language::Kotlin => "Kotlin",
            Language::OCaml => "OCaml",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Swift => "Swift",
            Language::Zig => "Zig",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Language::CATALOG
            .into_iter()
            .find(|lang| lang.id() == needle || lang.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| DomainError::UnsupportedLanguage(s.to_string()))
    }
}

/// Snapshot of the backend's current problem. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub contest_id: u16,
    pub contest_type: ContestType,
    pub problem_id: ProblemId,
    pub title: String,
    pub description: String,
    /// Seconds.
    pub time_limit: f64,
    /// Megabytes.
    pub memory_limit: u64,
    pub test_cases_link: String,
}

impl Problem {
    pub fn contest_slug(&self) -> String {
        format!(
            "{}{:03}",
            self.contest_type.as_str().to_ascii_lowercase(),
            self.contest_id
        )
    }

    pub fn task_url(&self) -> String {
        let contest = self.contest_slug();
        format!(
            "https://atcoder.jp/contests/{contest}/tasks/{contest}_{}",
            self.problem_id.as_str().to_ascii_lowercase()
        )
    }

    pub fn heading(&self) -> String {
        format!(
            "{}{:03} {} - {}",
            self.contest_type, self.contest_id, self.problem_id, self.title
        )
    }
}

/// Judge code of a single case. Codes outside the known catalog are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JudgeStatus {
    AC,
    WA,
    CE,
    RE,
    TLE,
    MLE,
    OLE,
    IE,
    Other(String),
}

impl JudgeStatus {
    pub fn is_accepted(&self) -> bool {
        *self == JudgeStatus::AC
    }

    pub fn code(&self) -> &str {
        match self {
            JudgeStatus::AC => "AC",
            JudgeStatus::WA => "WA",
            JudgeStatus::CE => "CE",
            JudgeStatus::RE => "RE",
            JudgeStatus::TLE => "TLE",
            JudgeStatus::MLE => "MLE",
            JudgeStatus::OLE => "OLE",
            JudgeStatus::IE => "IE",
            JudgeStatus::Other(code) => code,
        }
    }
}

impl From<String> for JudgeStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "AC" => JudgeStatus::AC,
            "WA" => JudgeStatus::WA,
            "CE" => JudgeStatus::CE,
            "RE" => JudgeStatus::RE,
            "TLE" => JudgeStatus::TLE,
            "MLE" => JudgeStatus::MLE,
            "OLE" => JudgeStatus::OLE,
            "IE" => JudgeStatus::IE,
            _ => JudgeStatus::Other(code),
        }
    }
}

impl From<JudgeStatus> for String {
    fn from(status: JudgeStatus) -> Self {
        match status {
            JudgeStatus::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of a single test case. The judge sends `null` for the status,
/// time and memory of a case it never ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub input: String,
    #[serde(default)]
    pub output: Option<String>,
    pub answer: String,
    #[serde(default)]
    pub status: Option<JudgeStatus>,
    /// Seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: f64,
    /// Megabytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: u64,
}

impl Verdict {
    /// Unjudged cases count as failures.
    pub fn is_accepted(&self) -> bool {
        self.status.as_ref().is_some_and(JudgeStatus::is_accepted)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
