//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to `metadata.json` in the content root; every key is optional and is merged
//! over the stock defaults before validation.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_file = "metadata.json"  # Content Store file, relative to the content root
//! assets_dir = "assets"           # Copied verbatim into the output root
//!
//! [layout]
//! narrow_breakpoint = 768   # Viewports narrower than this are "narrow" (px)
//! cards_wide = 4            # Cards per collapsed section on wide viewports
//! cards_narrow = 1          # Cards per collapsed section on narrow viewports
//!
//! [search]
//! min_query_chars = 2       # Shorter queries are rejected with a notice
//! auto_search_chars = 3     # Typing this many characters triggers search
//! debounce_ms = 500         # Pause after typing before auto-search fires
//!
//! [timing]
//! auto_open_delay_ms = 500     # Deferred open of a `?video=` deep link
//! player_close_delay_ms = 300  # Player region removal after closing
//! notice_dismiss_ms = 5000     # Transient notices disappear after this
//!
//! [thumbnails]
//! tiers = ["maxresdefault", "sddefault", "hqdefault", "mqdefault", "default"]
//! initial = "hqdefault"     # First tier requested; failures walk down the list
//!
//! [links]
//! platform_name = "YouTube"
//! watch = "https://www.youtube.com/watch?v={id}"
//! embed = "https://www.youtube.com/embed/{id}"
//! thumbnail = "https://img.youtube.com/vi/{id}/{tier}.jpg"
//! channel = "https://youtube.com/channel/{id}"
//! download = "https://drive.google.com/uc?export=download&id={id}"
//! preview = "https://drive.google.com/file/d/{id}/preview"
//!
//! [export]
//! filename_prefix = "academic-hub-backup"
//!
//! [colors.light]
//! background = "#f8fafc"
//! ...
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [layout]
//! cards_wide = 3
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content Store file name, relative to the content root.
    pub content_file: String,
    /// Static assets directory, relative to the content root.
    pub assets_dir: String,
    /// Collapsed-section card limits and the responsive breakpoint.
    pub layout: LayoutConfig,
    /// Search thresholds.
    pub search: SearchConfig,
    /// Deferred task delays.
    pub timing: TimingConfig,
    /// Video thumbnail degrade chain.
    pub thumbnails: ThumbnailsConfig,
    /// External platform URL templates.
    pub links: LinksConfig,
    /// Backup export settings.
    pub export: ExportConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_file: "metadata.json".to_string(),
            assets_dir: "assets".to_string(),
            layout: LayoutConfig::default(),
            search: SearchConfig::default(),
            timing: TimingConfig::default(),
            thumbnails: ThumbnailsConfig::default(),
            links: LinksConfig::default(),
            export: ExportConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.cards_wide == 0 || self.layout.cards_narrow == 0 {
            return Err(ConfigError::Validation(
                "layout.cards_wide and layout.cards_narrow must be at least 1".into(),
            ));
        }
        if self.search.min_query_chars == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_chars must be at least 1".into(),
            ));
        }
        if self.search.auto_search_chars < self.search.min_query_chars {
            return Err(ConfigError::Validation(
                "search.auto_search_chars must not be below search.min_query_chars".into(),
            ));
        }
        if self.thumbnails.tiers.is_empty() {
            return Err(ConfigError::Validation(
                "thumbnails.tiers must not be empty".into(),
            ));
        }
        if !self.thumbnails.tiers.contains(&self.thumbnails.initial) {
            return Err(ConfigError::Validation(format!(
                "thumbnails.initial '{}' is not listed in thumbnails.tiers",
                self.thumbnails.initial
            )));
        }
        for (key, template) in self.links.id_templates() {
            if !template.contains("{id}") {
                return Err(ConfigError::Validation(format!(
                    "links.{key} must contain an {{id}} placeholder"
                )));
            }
        }
        if !self.links.thumbnail.contains("{tier}") {
            return Err(ConfigError::Validation(
                "links.thumbnail must contain a {tier} placeholder".into(),
            ));
        }
        if self.export.filename_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.filename_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Responsive layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Viewport widths strictly below this are narrow (px).
    pub narrow_breakpoint: u32,
    /// Cards visible in a collapsed section on wide viewports.
    pub cards_wide: usize,
    /// Cards visible in a collapsed section on narrow viewports.
    pub cards_narrow: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: 768,
            cards_wide: 4,
            cards_narrow: 1,
        }
    }
}

impl LayoutConfig {
    /// Number of cards a collapsed section shows at `viewport_width`.
    pub fn collapsed_limit(&self, viewport_width: u32) -> usize {
        if viewport_width < self.narrow_breakpoint {
            self.cards_narrow
        } else {
            self.cards_wide
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Trimmed queries shorter than this are rejected.
    pub min_query_chars: usize,
    /// Raw input length that arms the debounced auto-search.
    pub auto_search_chars: usize,
    /// Quiet period after the last keystroke before auto-search fires.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            auto_search_chars: 3,
            debounce_ms: 500,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Delays for the controller's scheduled tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub auto_open_delay_ms: u64,
    pub player_close_delay_ms: u64,
    pub notice_dismiss_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            auto_open_delay_ms: 500,
            player_close_delay_ms: 300,
            notice_dismiss_ms: 5000,
        }
    }
}

impl TimingConfig {
    pub fn auto_open_delay(&self) -> Duration {
        Duration::from_millis(self.auto_open_delay_ms)
    }

    pub fn player_close_delay(&self) -> Duration {
        Duration::from_millis(self.player_close_delay_ms)
    }

    pub fn notice_dismiss(&self) -> Duration {
        Duration::from_millis(self.notice_dismiss_ms)
    }
}

/// Thumbnail quality tiers, ordered highest resolution first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    pub tiers: Vec<String>,
    /// Tier requested first. Each load failure falls back one tier down.
    pub initial: String,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            tiers: ["maxresdefault", "sddefault", "hqdefault", "mqdefault", "default"]
                .map(String::from)
                .to_vec(),
            initial: "hqdefault".to_string(),
        }
    }
}

/// URL templates for the external video platform and file host.
///
/// `{id}` is replaced by the record identifier, `{tier}` by a thumbnail tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Shown on "Watch on ..." buttons.
    pub platform_name: String,
    pub watch: String,
    pub embed: String,
    pub thumbnail: String,
    pub channel: String,
    pub download: String,
    pub preview: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            platform_name: "YouTube".to_string(),
            watch: "https://www.youtube.com/watch?v={id}".to_string(),
            embed: "https://www.youtube.com/embed/{id}".to_string(),
            thumbnail: "https://img.youtube.com/vi/{id}/{tier}.jpg".to_string(),
            channel: "https://youtube.com/channel/{id}".to_string(),
            download: "https://drive.google.com/uc?export=download&id={id}".to_string(),
            preview: "https://drive.google.com/file/d/{id}/preview".to_string(),
        }
    }
}

impl LinksConfig {
    fn id_templates(&self) -> [(&'static str, &str); 6] {
        [
            ("watch", &self.watch),
            ("embed", &self.embed),
            ("thumbnail", &self.thumbnail),
            ("channel", &self.channel),
            ("download", &self.download),
            ("preview", &self.preview),
        ]
    }
}

/// Backup export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Backup files are named `<prefix>-<YYYY-MM-DD>.json`.
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "academic-hub-backup".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and header surface.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (card details, footer).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Buttons, links and card header bands.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            surface: "#111827".to_string(),
            text: "#e5e7eb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1f2937".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Resource Hub Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to metadata.json in the content directory.
# Unknown keys will cause an error.

# Content Store file, relative to the content directory.
content_file = "metadata.json"

# Static assets (favicon, images) copied verbatim into the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Viewports narrower than this many pixels use the narrow card limit.
narrow_breakpoint = 768

# Cards shown per collapsed section ("Show All" reveals the rest).
cards_wide = 4
cards_narrow = 1

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Trimmed queries shorter than this are rejected with a notice.
min_query_chars = 2

# Typing at least this many characters searches automatically...
auto_search_chars = 3

# ...once input has paused for this many milliseconds.
debounce_ms = 500

# ---------------------------------------------------------------------------
# Timing
# ---------------------------------------------------------------------------
[timing]
# Delay before a ?video=<id> deep link opens its player.
auto_open_delay_ms = 500

# Delay before a closed player region is removed.
player_close_delay_ms = 300

# Transient notices disappear after this many milliseconds.
notice_dismiss_ms = 5000

# ---------------------------------------------------------------------------
# Video thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Quality tiers, highest resolution first.
tiers = ["maxresdefault", "sddefault", "hqdefault", "mqdefault", "default"]

# Tier requested first. Every load failure falls back exactly one tier.
initial = "hqdefault"

# ---------------------------------------------------------------------------
# External links. {id} is the record identifier, {tier} a thumbnail tier.
# ---------------------------------------------------------------------------
[links]
platform_name = "YouTube"
watch = "https://www.youtube.com/watch?v={id}"
embed = "https://www.youtube.com/embed/{id}"
thumbnail = "https://img.youtube.com/vi/{id}/{tier}.jpg"
channel = "https://youtube.com/channel/{id}"
download = "https://drive.google.com/uc?export=download&id={id}"
preview = "https://drive.google.com/file/d/{id}/preview"

# ---------------------------------------------------------------------------
# Backup export
# ---------------------------------------------------------------------------
[export]
# Backups are written as <prefix>-<YYYY-MM-DD>.json
filename_prefix = "academic-hub-backup"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#0f172a"
text_muted = "#64748b"    # Card details, footer
border = "#e2e8f0"
accent = "#2563eb"        # Buttons, links, card headers

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
surface = "#111827"
text = "#e5e7eb"
text_muted = "#9ca3af"
border = "#1f2937"
accent = "#60a5fa"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

/// Generate the responsive card-limit rule.
///
/// Collapsed grids are rendered with the wide limit; below the breakpoint the
/// cards past the narrow limit carry `.narrow-overflow` and are hidden here,
/// and toggles only needed on small screens (`.narrow-only`) appear.
pub fn generate_layout_css(layout: &LayoutConfig) -> String {
    format!(
        r#"@media (max-width: {max}px) {{
    .resource-grid:not(.show-all) .narrow-overflow {{
        display: none;
    }}
    .toggle-resources.narrow-only {{
        display: inline-flex;
    }}
}}"#,
        max = layout.narrow_breakpoint.saturating_sub(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.accent, "#2563eb");
        assert_eq!(config.colors.dark.background, "#0b1120");
    }

    #[test]
    fn default_config_matches_page_behaviour() {
        let config = SiteConfig::default();
        assert_eq!(config.content_file, "metadata.json");
        assert_eq!(config.layout.narrow_breakpoint, 768);
        assert_eq!(config.layout.cards_wide, 4);
        assert_eq!(config.layout.cards_narrow, 1);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.auto_search_chars, 3);
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.timing.auto_open_delay(), Duration::from_millis(500));
        assert_eq!(config.thumbnails.tiers.len(), 5);
        assert_eq!(config.thumbnails.initial, "hqdefault");
    }

    #[test]
    fn collapsed_limit_switches_at_breakpoint() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.collapsed_limit(767), 1);
        assert_eq!(layout.collapsed_limit(768), 4);
        assert_eq!(layout.collapsed_limit(1920), 4);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[layout]
cards_wide = 3
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.layout.cards_wide, 3);
        // Default values preserved
        assert_eq!(config.layout.cards_narrow, 1);
        assert_eq!(config.search.min_query_chars, 2);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn layout_css_hides_narrow_overflow_below_breakpoint() {
        let css = generate_layout_css(&LayoutConfig::default());
        assert!(css.contains("max-width: 767px"));
        assert!(css.contains(".narrow-overflow"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.layout.cards_wide, 4);
        assert_eq!(config.export.filename_prefix, "academic-hub-backup");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[search]
debounce_ms = 250

[links]
platform_name = "PeerTube"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.links.platform_name, "PeerTube");
        // Unspecified values should be defaults
        assert_eq!(config.links.embed, "https://www.youtube.com/embed/{id}");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[search]
min_query_chars = 2
debounce_ms = 500
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[search]
debounce_ms = 100
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let search = merged.get("search").unwrap();
        assert_eq!(search.get("debounce_ms").unwrap().as_integer(), Some(100));
        assert_eq!(search.get("min_query_chars").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_overlay_replaces_arrays() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[thumbnails]
tiers = ["hqdefault", "default"]
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let tiers = merged
            .get("thumbnails")
            .unwrap()
            .get("tiers")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(tiers.len(), 2);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[layout]
cards_wdie = 3
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[imagez]\nquality = 90\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_card_limit() {
        let mut config = SiteConfig::default();
        config.layout.cards_narrow = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_auto_search_below_minimum() {
        let mut config = SiteConfig::default();
        config.search.auto_search_chars = 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auto_search_chars"));
    }

    #[test]
    fn validate_initial_tier_must_be_listed() {
        let mut config = SiteConfig::default();
        config.thumbnails.initial = "ultra".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ultra"));
    }

    #[test]
    fn validate_empty_tiers() {
        let mut config = SiteConfig::default();
        config.thumbnails.tiers.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_template_needs_id_placeholder() {
        let mut config = SiteConfig::default();
        config.links.preview = "https://files.example.com/preview".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("links.preview"));
    }

    #[test]
    fn validate_thumbnail_needs_tier_placeholder() {
        let mut config = SiteConfig::default();
        config.links.thumbnail = "https://img.example.com/{id}.jpg".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[layout]\ncards_wide = 0\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.layout.cards_wide, defaults.layout.cards_wide);
        assert_eq!(config.thumbnails.tiers, defaults.thumbnails.tiers);
        assert_eq!(config.links.download, defaults.links.download);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
        assert_eq!(config.timing.notice_dismiss_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[layout]",
            "[search]",
            "[timing]",
            "[thumbnails]",
            "[links]",
            "[export]",
            "[colors.light]",
            "[colors.dark]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in ["layout", "search", "timing", "thumbnails", "links", "export", "colors"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
