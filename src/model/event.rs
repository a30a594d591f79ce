use serde::Serialize;

/// A tournament belonging to a circuit year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
}

/// An `a.event-item` entry on a circuit page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentLink {
    pub id: String,
    pub name: String,
}

impl From<TournamentLink> for Tournament {
    fn from(link: TournamentLink) -> Self {
        Tournament {
            id: link.id,
            name: link.name,
        }
    }
}
