/// Topological location of a point or side relative to an input geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    On,
    Left,
    Right,
}

/// Locations of an edge relative to a single input geometry.
///
/// Line edges only carry `on`; area edges also carry `left` and `right`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TopologyLocation {
    pub on: Option<Location>,
    pub left: Option<Location>,
    pub right: Option<Location>,
}

impl TopologyLocation {
    pub fn line(on: Location) -> Self {
        Self { on: Some(on), left: None, right: None }
    }

    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self { on: Some(on), left: Some(left), right: Some(right) }
    }

    pub fn get(&self, pos: Position) -> Option<Location> {
        match pos {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    pub fn is_null(&self) -> bool {
        self.on.is_none() && self.left.is_none() && self.right.is_none()
    }

    pub fn is_area(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Fills in any location that is unset here but set in `other`.
    pub fn merge(&mut self, other: &TopologyLocation) {
        self.on = self.on.or(other.on);
        self.left = self.left.or(other.left);
        self.right = self.right.or(other.right);
    }
}

/// Labelling of an edge with respect to the two input geometries of an overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    pub fn new(geom0: TopologyLocation, geom1: TopologyLocation) -> Self {
        Self { elt: [geom0, geom1] }
    }

    /// An area label for a single geometry, the other geometry left unset.
    pub fn area(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::default();
        label.elt[geom_index] = TopologyLocation::area(on, left, right);
        label
    }

    pub fn line(geom_index: usize, on: Location) -> Self {
        let mut label = Self::default();
        label.elt[geom_index] = TopologyLocation::line(on);
        label
    }

    pub fn location(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.elt[geom_index].get(pos)
    }

    pub fn topology_location(&self, geom_index: usize) -> &TopologyLocation {
        &self.elt[geom_index]
    }

    pub fn is_area(&self) -> bool {
        self.elt.iter().any(TopologyLocation::is_area)
    }

    pub fn is_area_for(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_area()
    }

    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|tl| !tl.is_null()).count()
    }

    /// The label as seen from the reverse traversal of the edge.
    pub fn flipped(&self) -> Self {
        let mut label = *self;
        for tl in &mut label.elt {
            tl.flip();
        }
        label
    }

    pub fn merge(&mut self, other: &Label) {
        for (mine, theirs) in self.elt.iter_mut().zip(other.elt.iter()) {
            mine.merge(theirs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_flip() {
        let label = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        assert!(label.is_area());
        assert!(label.is_area_for(0));
        assert!(!label.is_area_for(1));
        assert_eq!(label.geometry_count(), 1);

        let flipped = label.flipped();
        assert_eq!(flipped.location(0, Position::Left), Some(Location::Interior));
        assert_eq!(flipped.location(0, Position::Right), Some(Location::Exterior));
        assert_eq!(flipped.location(0, Position::On), Some(Location::Boundary));
    }

    #[test]
    fn test_line_label_is_not_area() {
        let label = Label::line(1, Location::Interior);
        assert!(!label.is_area());
        assert_eq!(label.location(1, Position::On), Some(Location::Interior));
    }

    #[test]
    fn test_merge_fills_unset() {
        let mut a = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        let b = Label::line(1, Location::Exterior);
        a.merge(&b);
        assert_eq!(a.geometry_count(), 2);
        assert_eq!(a.location(1, Position::On), Some(Location::Exterior));
        assert_eq!(a.location(0, Position::Right), Some(Location::Interior));
    }
}
