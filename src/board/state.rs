use crate::domain::{BirthEntry, BirthPayload};

/// Status of the most recent lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Success(BirthPayload),
    Error(String),
}

impl FetchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn payload(&self) -> Option<&BirthPayload> {
        match self {
            FetchState::Success(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Parameters for the single lookup triggered by a date selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub month: String,
    pub day: String,
    pub generation: u64,
}

/// What the result panel shows. Exactly one variant at a time.
#[derive(Debug, PartialEq)]
pub enum ResultPanel<'a> {
    NoDateSelected,
    Loading,
    Entries(Vec<&'a BirthEntry>),
    Failed(&'a str),
}
