use std::{collections::HashMap, sync::Arc, time::Duration};

use imgserve_core::{ServerError, ServerFn, ServerRef};
use imgserve_model::{Image, Params, SOURCE_PARAM};
use tracing::debug;

/// In-memory image store exposed as a leaf server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: HashMap<String, Image>,
    latency: Duration,
}

impl MemoryStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            images: HashMap::new(),
            latency,
        }
    }

    pub fn insert(&mut self, source: impl Into<String>, image: Image) -> &mut Self {
        self.images.insert(source.into(), image);
        self
    }

    /// Serve images by `source`, after the configured latency.
    pub fn into_server(self) -> ServerRef {
        let store = Arc::new(self);
        ServerFn::arc(move |params: Params| {
            let store = Arc::clone(&store);
            async move {
                let source = params.get_string(SOURCE_PARAM)?;
                tokio::time::sleep(store.latency).await;

                debug!(source, "store lookup");
                store
                    .images
                    .get(source)
                    .cloned()
                    .ok_or_else(|| ServerError::NotFound(source.to_string()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgserve_core::Server;

    fn store() -> ServerRef {
        let mut s = MemoryStore::new(Duration::ZERO);
        s.insert("a.png", Image::new("png", vec![1u8]));
        s.into_server()
    }

    #[tokio::test]
    async fn serves_known_sources() {
        let img = store().get(Params::single("source", "a.png")).await.unwrap();
        assert_eq!(img.format(), "png");
    }

    #[tokio::test]
    async fn unknown_source_is_not_found() {
        match store().get(Params::single("source", "b.png")).await {
            Err(ServerError::NotFound(s)) => assert_eq!(s, "b.png"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_string_source_is_a_param_error() {
        let err = store().get(Params::single("source", 3)).await.unwrap_err();
        assert!(matches!(err, ServerError::Param(_)));
    }
}
