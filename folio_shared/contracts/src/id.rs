use std::fmt::Debug;

use uuid::Uuid;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait IdService: Send + Sync + 'static {
    /// Generate a random id. Ids never repeat, not even within the same
    /// clock tick.
    fn generate<I: From<Uuid> + Debug + 'static>(&self) -> I;
}

#[cfg(feature = "mock")]
impl MockIdService {
    pub fn with_generate<I: From<Uuid> + Debug + Send + 'static>(mut self, id: I) -> Self {
        self.expect_generate().once().return_once(|| id);
        self
    }

    /// Expect one `generate::<Uuid>()` call per element of `ids`, answered in
    /// order.
    pub fn with_generate_sequence(mut self, ids: Vec<Uuid>) -> Self {
        let calls = ids.len();
        let mut ids = ids.into_iter();
        self.expect_generate::<Uuid>()
            .times(calls)
            .returning(move || ids.next().unwrap_or_else(Uuid::nil));
        self
    }
}
