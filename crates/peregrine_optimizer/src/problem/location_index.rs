use geo::{Distance, Haversine};
use peregrine_durations::coordinate::Coordinate;
use rstar::primitives::GeomWithData;
use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use super::location::Location;

/// Longitude/latitude point indexed under the haversine metric.
pub struct IndexedPoint {
    x: f64,
    y: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        let distance = Haversine.distance(
            geo::Point::new(self.x, self.y),
            geo::Point::new(point[0], point[1]),
        );

        distance * distance
    }
}

type LocationIndexObject = GeomWithData<IndexedPoint, usize>;

/// Nearest-neighbour index over a fixed slice of locations, yielding
/// positions into that slice ordered by great-circle distance.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject>,
}

impl LocationIndex {
    pub fn new(locations: &[Location]) -> Self {
        let tree = RTree::bulk_load(
            locations
                .iter()
                .enumerate()
                .map(|(position, location)| {
                    LocationIndexObject::new(
                        IndexedPoint {
                            x: location.coordinate.longitude,
                            y: location.coordinate.latitude,
                        },
                        position,
                    )
                })
                .collect(),
        );

        Self { tree }
    }

    pub fn nearest_iter(&self, from: &Coordinate) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .nearest_neighbor_iter(&[from.longitude, from.latitude])
            .map(|object| object.data)
    }
}
