use crate::resolve::GameVariableRegistry;

/// Export settings shared by every item of a mod.
///
/// # Example
///
/// ```
/// use jokerc::ExportConfig;
///
/// let config = ExportConfig::new()
///     .prefix("cats")
///     .atlas("CatJokers")
///     .columns(8);
/// assert_eq!(config.owner_key("lucky_cat"), "j_cats_lucky_cat");
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub(crate) prefix: String,
    pub(crate) atlas_key: String,
    pub(crate) atlas_columns: u32,
    pub(crate) wrap_width: usize,
    pub(crate) registry: GameVariableRegistry,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            prefix: "custom".to_owned(),
            atlas_key: "CustomJokers".to_owned(),
            atlas_columns: 10,
            wrap_width: 28,
            registry: GameVariableRegistry::builtin(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mod prefix used in owner keys (`j_<prefix>_<key>`).
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = crate::lua::identifier(prefix);
        self
    }

    /// Atlas every item's sprite is drawn from.
    #[must_use]
    pub fn atlas(mut self, key: &str) -> Self {
        self.atlas_key = key.to_owned();
        self
    }

    /// Cells per atlas row.
    #[must_use]
    pub fn columns(mut self, columns: u32) -> Self {
        self.atlas_columns = columns.max(1);
        self
    }

    /// Soft wrap width for description lines, in visible characters.
    #[must_use]
    pub fn wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(1);
        self
    }

    /// Replace the game-variable table used to resolve `GAMEVAR:` values.
    #[must_use]
    pub fn registry(mut self, registry: GameVariableRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Full runtime key of the item with definition key `slug`.
    #[must_use]
    pub fn owner_key(&self, slug: &str) -> String {
        format!("j_{}_{slug}", self.prefix)
    }

    #[must_use]
    pub fn game_variables(&self) -> &GameVariableRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.atlas_columns, 10);
        assert_eq!(config.wrap_width, 28);
        assert_eq!(config.owner_key("x"), "j_custom_x");
        assert!(!config.game_variables().is_empty());
    }

    #[test]
    fn prefix_is_normalized() {
        let config = ExportConfig::new().prefix("My Mod").columns(0);
        assert_eq!(config.owner_key("cat"), "j_my_mod_cat");
        assert_eq!(config.atlas_columns, 1);
    }

    #[test]
    fn custom_registry() {
        let registry = GameVariableRegistry::empty().register("gold", "G.GAME.dollars", "Gold");
        let config = ExportConfig::new().registry(registry);
        assert_eq!(config.game_variables().len(), 1);
    }
}
