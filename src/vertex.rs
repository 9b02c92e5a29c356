use std::sync::atomic::{AtomicUsize, Ordering};

/// An opaque vertex identity.
///
/// A vertex carries no structure: it is only ever compared for identity. Two
/// vertices issued by [`VertexSource::fresh`] are never equal, even when they
/// come from different sources, because each vertex remembers the tag of the
/// source that issued it alongside its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    source: u64,
    label: usize,
}

impl Vertex {
    /// The debug label, unique within the issuing source.
    pub fn label(&self) -> usize {
        self.label
    }

    /// Tag of the [`VertexSource`] that issued this vertex.
    pub fn source_tag(&self) -> u64 {
        self.source
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.label)
    }
}

/// Issues fresh [`Vertex`] identities.
///
/// The label counter is atomic so a shared `&VertexSource` can be used from
/// several threads. Labels only serve `Display` and ordering.
#[derive(Debug)]
pub struct VertexSource {
    tag: u64,
    next: AtomicUsize,
}

impl VertexSource {
    /// A source with a random tag, so its vertices never collide with those of
    /// another source.
    pub fn new() -> Self {
        Self::with_tag(rand::random())
    }

    /// A source with an explicit tag, for reproducible labels.
    ///
    /// Vertices from different sources are only guaranteed distinct when the
    /// tags differ. Two sources created with the same tag issue equal
    /// vertices for equal labels, so graphs built from both can silently
    /// share vertices. Use [`VertexSource::new`] unless the tag is known to
    /// be unique.
    pub fn with_tag(tag: u64) -> Self {
        VertexSource {
            tag,
            next: AtomicUsize::new(0),
        }
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Number of vertices issued so far.
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }

    pub fn fresh(&self) -> Vertex {
        Vertex {
            source: self.tag,
            label: self.next.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn fresh_many(&self, n: usize) -> Vec<Vertex> {
        (0..n).map(|_| self.fresh()).collect()
    }
}

impl Default for VertexSource {
    fn default() -> Self {
        Self::new()
    }
}
