use std::fmt;

/// The two interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Uniform-cost expansion over the whole grid (Dijkstra variant).
    Dijkstra,
    /// Manhattan-heuristic-guided expansion (A* variant).
    AStar,
}

impl Strategy {
    /// Parse a host-supplied strategy name.
    ///
    /// Accepts the wire names `"dijkstra"` and `"aStar"` (plus the
    /// all-lowercase `"astar"`). Unrecognized names yield `None`; the host
    /// treats that as a no-op and runs nothing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dijkstra" => Some(Self::Dijkstra),
            "aStar" | "astar" => Some(Self::AStar),
            _ => None,
        }
    }

    /// Canonical name, matching what [`from_name`](Strategy::from_name)
    /// accepts.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::AStar => "aStar",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_parse() {
        assert_eq!(Strategy::from_name("dijkstra"), Some(Strategy::Dijkstra));
        assert_eq!(Strategy::from_name("aStar"), Some(Strategy::AStar));
        assert_eq!(Strategy::from_name("astar"), Some(Strategy::AStar));
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(Strategy::from_name("bfs"), None);
        assert_eq!(Strategy::from_name(""), None);
        assert_eq!(Strategy::from_name("Dijkstra"), None);
    }

    #[test]
    fn names_round_trip() {
        for s in [Strategy::Dijkstra, Strategy::AStar] {
            assert_eq!(Strategy::from_name(s.name()), Some(s));
        }
    }
}
