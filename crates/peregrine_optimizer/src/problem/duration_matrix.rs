use peregrine_durations::coordinate::Coordinate;

/// Pairwise travel durations in seconds, stored flat.
/// The entry for `(from, to)` lives at `from * len + to`.
#[derive(Debug, Clone)]
pub struct DurationMatrix {
    durations: Vec<f64>,
    len: usize,
}

impl DurationMatrix {
    /// Builds a matrix from nested rows. Panics unless every row's length
    /// equals the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let len = rows.len();

        for (i, row) in rows.iter().enumerate() {
            assert!(
                row.len() == len,
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                len
            );
        }

        Self {
            durations: rows.into_iter().flatten().collect(),
            len,
        }
    }

    pub(crate) fn from_flat(durations: Vec<f64>, len: usize) -> Self {
        assert!(
            durations.len() == len * len,
            "flat matrix has {} entries for {} locations",
            durations.len(),
            len
        );

        Self { durations, len }
    }

    /// Straight-line durations over `coordinates` at `speed_kmh`.
    pub fn from_haversine(coordinates: &[Coordinate], speed_kmh: f64) -> Self {
        let len = coordinates.len();
        let mut durations = vec![0.0; len * len];
        let speed = speed_kmh / 3.6;

        for (i, from) in coordinates.iter().enumerate() {
            for (j, to) in coordinates.iter().enumerate() {
                durations[i * len + j] = from.haversine_distance(to) / speed;
            }
        }

        Self { durations, len }
    }

    #[inline(always)]
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations[from * self.len + to]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
