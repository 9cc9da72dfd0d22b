use super::shape::ShapeId;

slotmap::new_key_type! {
    /// Unique identifier for an edge segment in the tiling arena.
    pub struct SegmentId;
}

/// One oriented edge of a shape.
///
/// Endpoints are derived from the owning shape's vertex list (`edge` is
/// the index of the first endpoint), so there is no duplicated
/// coordinate state to invalidate. `connection` is the non-owning link
/// to the matching segment elsewhere in the structure, set symmetrically
/// by the connect pass.
#[derive(Clone, Debug)]
pub struct SegmentData {
    pub shape: ShapeId,
    pub edge: usize,
    pub connection: Option<SegmentId>,
}

impl SegmentData {
    /// Whether this segment has been matched with a counterpart.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }
}
