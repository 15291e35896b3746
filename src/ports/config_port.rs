//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// `None` when the key is absent or blank; unparseable values are
    /// returned as `Some(Err(raw))` so validation can report them.
    fn get_optional_double(&self, section: &str, key: &str) -> Option<Result<f64, String>> {
        let raw = self.get_string(section, key)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.parse::<f64>().map_err(|_| raw.clone()))
    }
}
