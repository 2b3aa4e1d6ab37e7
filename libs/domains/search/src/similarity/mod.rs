mod index;
mod pinecone;

pub use index::SimilarityIndex;
pub use pinecone::{PineconeConfig, PineconeIndex};

#[cfg(any(test, feature = "mocks"))]
pub use index::MockSimilarityIndex;
