use mockall::automock;

/// Tells the presentation layer that cached renders of `path` are stale.
#[automock]
pub trait PathRevalidator {
    fn revalidate(&self, path: &str);
}
