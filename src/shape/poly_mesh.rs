use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::shape::Plane;
use crate::utils::hashmap::HashMap;
use crate::utils::hashset::HashSet;
use crate::utils::{self, SortedPair};
use na::Unit;
use smallvec::SmallVec;

/// The vertex indices of a single polygonal face.
pub type FaceIndices = SmallVec<[u32; 8]>;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Per-face state carried through the fracture.
pub struct FaceFlags(u8);

bitflags::bitflags! {
    impl FaceFlags: u8 {
        /// The face was introduced by a cut rather than inherited from the source surface.
        ///
        /// This is a transient marker: the interior post-processing consumes and clears it.
        const HIDDEN = 1;
        /// The face is rendered with smooth shading.
        const SMOOTH = 1 << 1;
    }
}

/// A polygonal face of a [`PolyMesh`].
///
/// The vertices are listed counter-clockwise when seen from outside of the mesh.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Face {
    /// The indices of the vertices of this face, in the vertex buffer of its mesh.
    pub vertices: FaceIndices,
    /// The flags of this face.
    pub flags: FaceFlags,
    /// The index of the material of this face.
    pub material_index: u16,
}

impl Face {
    /// Creates a face with no flag and the material `0`.
    pub fn new(vertices: impl IntoIterator<Item = u32>) -> Self {
        Face {
            vertices: vertices.into_iter().collect(),
            flags: FaceFlags::empty(),
            material_index: 0,
        }
    }

    /// The same face with a different vertex list.
    #[must_use]
    pub fn with_vertices(&self, vertices: impl IntoIterator<Item = u32>) -> Self {
        Face {
            vertices: vertices.into_iter().collect(),
            flags: self.flags,
            material_index: self.material_index,
        }
    }

    /// Is this face flagged as an interior (cut) face?
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(FaceFlags::HIDDEN)
    }

    /// The undirected edges of this face.
    pub fn edges(&self) -> impl Iterator<Item = SortedPair<u32>> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| SortedPair::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// A named set of vertex weights.
///
/// Vertices absent from `weights` do not belong to the group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VertexGroup {
    /// The name of this group.
    pub name: String,
    /// The weight of each vertex belonging to this group.
    pub weights: HashMap<u32, Real>,
}

/// A polygonal surface mesh.
///
/// This is the mesh representation exchanged with the geometry kernel: the source objects,
/// the cell hulls, and the fragments are all `PolyMesh`es.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    vertices: Vec<Point<Real>>,
    faces: Vec<Face>,
    sharp_edges: HashSet<SortedPair<u32>>,
    vertex_groups: Vec<VertexGroup>,
    materials: Vec<String>,
}

impl PolyMesh {
    /// Creates a new mesh from its vertex buffer and faces.
    ///
    /// # Panics
    ///
    /// Panics if a face references a vertex out of bounds.
    pub fn new(vertices: Vec<Point<Real>>, faces: Vec<Face>) -> Self {
        assert!(
            faces
                .iter()
                .flat_map(|f| f.vertices.iter())
                .all(|i| (*i as usize) < vertices.len()),
            "A face references a vertex that does not exist."
        );

        PolyMesh {
            vertices,
            faces,
            ..Default::default()
        }
    }

    /// Creates a new mesh from its vertex buffer and raw polygons.
    pub fn from_polygons(vertices: Vec<Point<Real>>, polygons: &[&[u32]]) -> Self {
        let faces = polygons
            .iter()
            .map(|poly| Face::new(poly.iter().copied()))
            .collect();
        Self::new(vertices, faces)
    }

    /// An axis-aligned box centered at the origin, made of six quads.
    pub fn cuboid(half_extents: Vector<Real>) -> Self {
        let aabb = Aabb::from_half_extents(Point::origin(), half_extents);
        let vertices = aabb.vertices().to_vec();
        Self::from_polygons(
            vertices,
            &[
                &[1, 2, 6, 5],
                &[0, 4, 7, 3],
                &[2, 3, 7, 6],
                &[0, 1, 5, 4],
                &[4, 5, 6, 7],
                &[0, 3, 2, 1],
            ],
        )
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The faces of this mesh.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable access to the faces of this mesh.
    #[inline]
    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// The edges explicitly marked as sharp.
    #[inline]
    pub fn sharp_edges(&self) -> &HashSet<SortedPair<u32>> {
        &self.sharp_edges
    }

    /// Marks the edge joining `a` and `b` as sharp.
    #[inline]
    pub fn mark_sharp(&mut self, a: u32, b: u32) {
        let _ = self.sharp_edges.insert(SortedPair::new(a, b));
    }

    /// The vertex groups of this mesh.
    #[inline]
    pub fn vertex_groups(&self) -> &[VertexGroup] {
        &self.vertex_groups
    }

    /// The vertex group named `name`, if any.
    pub fn vertex_group(&self, name: &str) -> Option<&VertexGroup> {
        self.vertex_groups.iter().find(|g| g.name == name)
    }

    /// Returns the group named `name`, creating an empty one if it does not exist yet.
    pub fn vertex_group_mut(&mut self, name: &str) -> &mut VertexGroup {
        let pos = match self.vertex_groups.iter().position(|g| g.name == name) {
            Some(pos) => pos,
            None => {
                self.vertex_groups.push(VertexGroup {
                    name: name.to_string(),
                    weights: HashMap::default(),
                });
                self.vertex_groups.len() - 1
            }
        };

        &mut self.vertex_groups[pos]
    }

    /// The names of the materials referenced by the faces' `material_index`.
    #[inline]
    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    /// Replaces the material names of this mesh.
    #[inline]
    pub fn set_materials(&mut self, materials: Vec<String>) {
        self.materials = materials;
    }

    /// Does this mesh have no face?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() || self.vertices.is_empty()
    }

    /// The local-space AABB of this mesh.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.vertices)
    }

    /// The AABB of this mesh transformed by `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| pos * v))
    }

    /// Applies the transformation `pos` to every vertex of this mesh.
    pub fn transform_by(&mut self, pos: &Isometry<Real>) {
        for v in &mut self.vertices {
            *v = pos * *v;
        }
    }

    /// This mesh with the transformation `pos` applied to every vertex.
    #[must_use]
    pub fn transformed(mut self, pos: &Isometry<Real>) -> Self {
        self.transform_by(pos);
        self
    }

    /// Translates every vertex of this mesh.
    pub fn translate(&mut self, shift: &Vector<Real>) {
        for v in &mut self.vertices {
            *v += shift;
        }
    }

    /// The faces adjacent to each undirected edge.
    pub fn edge_faces(&self) -> HashMap<SortedPair<u32>, SmallVec<[u32; 2]>> {
        let mut result: HashMap<SortedPair<u32>, SmallVec<[u32; 2]>> = HashMap::default();

        for (fid, face) in self.faces.iter().enumerate() {
            for edge in face.edges() {
                result.entry(edge).or_default().push(fid as u32);
            }
        }

        result
    }

    /// The outward normal of the face `fid`, computed with Newell's method.
    ///
    /// Returns `None` if the face is degenerate.
    pub fn face_normal(&self, fid: usize) -> Option<UnitVector<Real>> {
        let normal = newell_normal(&self.vertices, &self.faces[fid].vertices);
        Unit::try_new(normal, Real::EPSILON)
    }

    /// The half-space supporting the face `fid`.
    ///
    /// The plane passes through the mean of the face vertices.
    pub fn face_plane(&self, fid: usize) -> Option<Plane> {
        let normal = self.face_normal(fid)?;
        let face = &self.faces[fid];
        let mut center = Vector::zeros();
        for i in &face.vertices {
            center += self.vertices[*i as usize].coords;
        }
        center /= face.vertices.len() as Real;
        Some(Plane::from_point_and_normal(&center.into(), normal))
    }

    /// Tests whether every vertex of this mesh lies inside of every face plane, up to `epsilon`.
    pub fn is_convex(&self, epsilon: Real) -> bool {
        (0..self.faces.len()).all(|fid| match self.face_plane(fid) {
            Some(plane) => self
                .vertices
                .iter()
                .all(|v| plane.contains_point(v, epsilon)),
            None => false,
        })
    }

    /// The signed volume enclosed by this mesh (positive for outward-oriented closed meshes).
    pub fn signed_volume(&self) -> Real {
        let mut volume = 0.0;

        for face in &self.faces {
            let a = self.vertices[face.vertices[0] as usize].coords;
            for k in 1..face.vertices.len().saturating_sub(1) {
                let b = self.vertices[face.vertices[k] as usize].coords;
                let c = self.vertices[face.vertices[k + 1] as usize].coords;
                volume += a.dot(&b.cross(&c));
            }
        }

        volume / 6.0
    }

    /// Appends a vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, pt: Point<Real>) -> u32 {
        self.vertices.push(pt);
        self.vertices.len() as u32 - 1
    }

    /// Appends a face.
    #[inline]
    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Removes every vertex not referenced by any face, remapping the faces, sharp edges and
    /// vertex groups.
    ///
    /// The remaining vertices keep their relative order.
    pub fn remove_unused_vertices(&mut self) {
        let mut remap = vec![u32::MAX; self.vertices.len()];

        for face in &self.faces {
            for id in &face.vertices {
                remap[*id as usize] = 0;
            }
        }

        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        for (id, new_id) in remap.iter_mut().enumerate() {
            if *new_id != u32::MAX {
                *new_id = new_vertices.len() as u32;
                new_vertices.push(self.vertices[id]);
            }
        }

        for face in &mut self.faces {
            for id in &mut face.vertices {
                *id = remap[*id as usize];
            }
        }

        self.vertices = new_vertices;
        self.remap_vertex_attributes(&remap);
    }

    /// Merges the vertices closer than `distance`.
    ///
    /// Faces collapsing to less than three distinct vertices are removed, as are the vertices no
    /// longer referenced.
    pub fn weld_vertices(&mut self, distance: Real) {
        let (welded, remap) = utils::weld_points(&self.vertices, distance);

        if welded.len() != self.vertices.len() {
            self.vertices = welded;
            self.faces.retain_mut(|face| {
                for id in &mut face.vertices {
                    *id = remap[*id as usize];
                }
                utils::dedup_polygon(&mut face.vertices);
                face.vertices.len() >= 3
            });
            self.remap_vertex_attributes(&remap);
        }

        self.remove_unused_vertices();
    }

    /// Applies an old-to-new vertex index map to the sharp edges and vertex groups.
    ///
    /// Entries mapped to `u32::MAX` are dropped.
    pub(crate) fn remap_vertex_attributes(&mut self, remap: &[u32]) {
        self.sharp_edges = self
            .sharp_edges
            .iter()
            .filter_map(|e| {
                let (a, b) = **e;
                let (a, b) = (remap[a as usize], remap[b as usize]);
                (a != u32::MAX && b != u32::MAX && a != b).then(|| SortedPair::new(a, b))
            })
            .collect();

        for group in &mut self.vertex_groups {
            group.weights = group
                .weights
                .iter()
                .filter_map(|(id, w)| {
                    let new_id = remap[*id as usize];
                    (new_id != u32::MAX).then_some((new_id, *w))
                })
                .collect();
        }
    }

    pub(crate) fn take_geometry(&mut self) -> (Vec<Point<Real>>, Vec<Face>) {
        (
            core::mem::take(&mut self.vertices),
            core::mem::take(&mut self.faces),
        )
    }

    pub(crate) fn replace_geometry(&mut self, vertices: Vec<Point<Real>>, faces: Vec<Face>) {
        self.vertices = vertices;
        self.faces = faces;
    }

    pub(crate) fn vertex_groups_mut(&mut self) -> &mut Vec<VertexGroup> {
        &mut self.vertex_groups
    }
}

/// The area-weighted (non-normalized) normal of a polygon, computed with Newell's method.
fn newell_normal(vertices: &[Point<Real>], polygon: &[u32]) -> Vector<Real> {
    let n = polygon.len();
    let mut normal = Vector::zeros();

    for i in 0..n {
        let a = vertices[polygon[i] as usize];
        let b = vertices[polygon[(i + 1) % n] as usize];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    normal
}
