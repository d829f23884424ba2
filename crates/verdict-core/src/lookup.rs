/// Resolves a message key plus positional arguments into display text
///
/// Implementations must not fail: an unknown key resolves to a sensible
/// default, usually the key itself. One instance serves every concurrent
/// request, hence `Send + Sync`.
pub trait MessageLookup: Send + Sync {
    fn get_message(&self, key: &str, args: &[&str]) -> String;
}

impl<F> MessageLookup for F
where
    F: Fn(&str, &[&str]) -> String + Send + Sync,
{
    fn get_message(&self, key: &str, args: &[&str]) -> String {
        self(key, args)
    }
}
