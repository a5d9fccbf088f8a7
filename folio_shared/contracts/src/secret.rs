use folio_models::Sensitive;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SecretStoreService: Send + Sync + 'static {
    /// Looks up the secret with the given logical name.
    ///
    /// Returns `None` if the secret is not set anywhere or is empty.
    fn get(&self, name: String) -> Option<Sensitive<String>>;
}

#[cfg(feature = "mock")]
impl MockSecretStoreService {
    pub fn with_get(mut self, name: String, result: Option<String>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(name))
            .return_once(|_| result.map(Into::into));
        self
    }
}
