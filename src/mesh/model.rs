//! Input model supplied by the geometry layer.
//!
//! A [`SurfaceModel`] is the flat description of a meshed CAD model: mesh
//! points, triangles grouped by surface, segments grouped by curve, and named
//! physical groups of point entities. Nothing here is derived; the
//! [`TriMesh`](super::TriMesh) builders turn it into topology.

use nalgebra::Point3;

/// The geometric entity a mesh vertex is classified on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    /// A model point.
    Point(i32),
    /// A model curve.
    Curve(i32),
    /// A model surface.
    Surface(i32),
}

/// A mesh point of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPoint {
    /// Position in 3-space.
    pub position: Point3<f64>,
    /// Entity the point is classified on, if known.
    pub entity: Option<EntityRef>,
}

impl ModelPoint {
    /// Create an unclassified point.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            entity: None,
        }
    }

    /// Create a point classified on `entity`.
    pub fn on(position: Point3<f64>, entity: EntityRef) -> Self {
        Self {
            position,
            entity: Some(entity),
        }
    }
}

/// Triangles of one model surface.
#[derive(Debug, Clone, Default)]
pub struct SurfacePatch {
    /// Surface tag.
    pub tag: i32,
    /// Triangles as indices into [`SurfaceModel::points`].
    pub triangles: Vec<[usize; 3]>,
    /// Tags of the curves bounding or embedded in this surface.
    pub curves: Vec<i32>,
}

/// Segments of one model curve.
#[derive(Debug, Clone, Default)]
pub struct FeatureCurve {
    /// Curve tag.
    pub tag: i32,
    /// Segments as indices into [`SurfaceModel::points`].
    pub segments: Vec<[usize; 2]>,
}

/// A model point entity with its mesh vertices.
#[derive(Debug, Clone, Default)]
pub struct PointEntity {
    /// Point entity tag.
    pub tag: i32,
    /// Mesh vertices classified on this entity. Only the first one is used
    /// as a singularity.
    pub vertices: Vec<usize>,
}

/// A named physical group of point entities.
#[derive(Debug, Clone, Default)]
pub struct PhysicalGroup {
    /// Group name.
    pub name: String,
    /// Point entities in the group.
    pub points: Vec<PointEntity>,
}

/// A meshed model: the input of the cut-graph pipeline.
#[derive(Debug, Clone, Default)]
pub struct SurfaceModel {
    /// All mesh points. Vertex ids of the built mesh equal these indices.
    pub points: Vec<ModelPoint>,
    /// Triangles grouped by surface.
    pub surfaces: Vec<SurfacePatch>,
    /// Segments grouped by curve.
    pub curves: Vec<FeatureCurve>,
    /// Named physical groups of dimension 0.
    pub groups: Vec<PhysicalGroup>,
}

impl SurfaceModel {
    /// Find a surface by tag.
    pub fn surface(&self, tag: i32) -> Option<&SurfacePatch> {
        self.surfaces.iter().find(|s| s.tag == tag)
    }

    /// Find a curve by tag.
    pub fn curve(&self, tag: i32) -> Option<&FeatureCurve> {
        self.curves.iter().find(|c| c.tag == tag)
    }
}

/// Prescribed index of a singular vertex.
///
/// Group names count the number of quadrilaterals meeting at the vertex
/// in the final quad layout; the integer index is the angular defect in
/// quarter-turn units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingularityIndex {
    /// Two quads meet (`SINGULARITY_OF_INDEX_TWO`).
    Two,
    /// Three quads meet (`SINGULARITY_OF_INDEX_THREE`).
    Three,
    /// Five quads meet (`SINGULARITY_OF_INDEX_FIVE`).
    Five,
    /// Six quads meet (`SINGULARITY_OF_INDEX_SIX`).
    Six,
    /// Eight quads meet (`SINGULARITY_OF_INDEX_EIGHT`).
    Eight,
}

impl SingularityIndex {
    /// Recognise a physical group name.
    pub fn from_group_name(name: &str) -> Option<Self> {
        match name {
            "SINGULARITY_OF_INDEX_TWO" => Some(Self::Two),
            "SINGULARITY_OF_INDEX_THREE" => Some(Self::Three),
            "SINGULARITY_OF_INDEX_FIVE" => Some(Self::Five),
            "SINGULARITY_OF_INDEX_SIX" => Some(Self::Six),
            "SINGULARITY_OF_INDEX_EIGHT" => Some(Self::Eight),
            _ => None,
        }
    }

    /// The physical group name for this index.
    pub fn group_name(self) -> &'static str {
        match self {
            Self::Two => "SINGULARITY_OF_INDEX_TWO",
            Self::Three => "SINGULARITY_OF_INDEX_THREE",
            Self::Five => "SINGULARITY_OF_INDEX_FIVE",
            Self::Six => "SINGULARITY_OF_INDEX_SIX",
            Self::Eight => "SINGULARITY_OF_INDEX_EIGHT",
        }
    }

    /// Integer index.
    pub fn value(self) -> i32 {
        match self {
            Self::Two => -2,
            Self::Three => -1,
            Self::Five => 1,
            Self::Six => 2,
            Self::Eight => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names_roundtrip() {
        for index in [
            SingularityIndex::Two,
            SingularityIndex::Three,
            SingularityIndex::Five,
            SingularityIndex::Six,
            SingularityIndex::Eight,
        ] {
            assert_eq!(SingularityIndex::from_group_name(index.group_name()), Some(index));
        }
        assert_eq!(SingularityIndex::from_group_name("BOUNDARY"), None);
    }

    #[test]
    fn test_index_values() {
        assert_eq!(SingularityIndex::Three.value(), -1);
        assert_eq!(SingularityIndex::Five.value(), 1);
        assert_eq!(SingularityIndex::Eight.value(), 4);
    }
}
