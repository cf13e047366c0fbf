/// Levels of the census hierarchy encoded in a block identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoType {
    State,      // Highest-level entity
    County,     // County -> State
    Tract,      // Tract -> County
    Block,      // Lowest-level entity
}

impl GeoType {
    /// Query-parameter name used by the statistics service.
    pub fn to_str(&self) -> &'static str {
        match self {
            GeoType::State => "state",
            GeoType::County => "county",
            GeoType::Tract => "tract",
            GeoType::Block => "block",
        }
    }

    /// Length of the identifier prefix naming an entity at this level.
    pub fn id_len(&self) -> usize {
        match self {
            GeoType::State  => 2,
            GeoType::County => 5,
            GeoType::Tract  => 11,
            GeoType::Block  => 15,
        }
    }

    pub fn order() -> [GeoType; 4] {
        [
            GeoType::State,
            GeoType::County,
            GeoType::Tract,
            GeoType::Block,
        ]
    }
}
