use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub movies: MovieStatistics,
    pub shows: ShowStatistics,
    pub books: u64,
    pub games: MediaStatistics,
    pub music: MediaStatistics,
    pub programs: MediaStatistics,
    pub genres: u64,
    pub authors: u64,
    pub pictures: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieStatistics {
    pub count: u64,
    pub media_count: u64,
    /// Total length in minutes
    pub length: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowStatistics {
    pub count: u64,
    pub seasons_count: u64,
    pub episodes_count: u64,
    /// Total episode length in minutes
    pub length: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaStatistics {
    pub count: u64,
    pub media_count: i64,
}
