use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::triage::{
    default_departments, Aggregator, Category, Department, Priority, PriorityWeights, Router,
    Scheduler, ViewController,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub routing: RoutingConfig,
    pub priority: PriorityWeights,
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Webhook returning classified tickets
    pub tickets_url: String,
    /// Base URL for classify / auto-reply / feedback endpoints
    pub api_base: String,
    pub health_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Model provider sent with single-email classification
    pub provider: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Department queues; a category may feed at most one of them
    pub departments: Vec<Department>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Sidebar width in characters
    pub sidebar_width: u16,
    /// Width percentage of the ticket list (detail pane gets the rest)
    pub list_width: u16,
    /// Date column width in characters
    pub date_width: usize,
    /// Sender column width in characters
    pub from_width: usize,
}

/// Semantic theme configuration using Capstan Cloud colors as defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg: String,
    pub bg_panel: String,
    pub bg_element: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    // Border colors
    pub border: String,
    pub border_subtle: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,
    pub secondary: String,

    // Semantic colors
    pub success: String,
    pub warning: String,
    pub error: String,

    // UI-specific mappings
    pub selected_bg: String,
    pub unread: String,
    pub urgent: String,
    pub important: String,
    pub low: String,
    pub categories: CategoryColors,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryColors {
    pub housing: String,
    pub food: String,
    pub finance: String,
    pub admin: String,
    pub transportation: String,
    pub internal: String,
    pub general: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            tickets_url: "https://classiftest.app.n8n.cloud/webhook/tickets".to_string(),
            api_base: "http://localhost:5000/api".to_string(),
            health_url: "http://localhost:5000/health".to_string(),
            timeout_secs: 15,
            provider: "gemini".to_string(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            departments: default_departments(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 28,
            list_width: 55,
            date_width: 14,
            from_width: 18,
        }
    }
}

/// Capstan Cloud theme - warm earth tones with gold accents
impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // Base colors
            bg: "#1a1917".to_string(),
            bg_panel: "#262422".to_string(),
            bg_element: "#393634".to_string(),
            fg: "#f7f7f5".to_string(),
            fg_muted: "#8c8985".to_string(),
            fg_subtle: "#b8b5b0".to_string(),

            // Border colors
            border: "#524f4c".to_string(),
            border_subtle: "#393634".to_string(),
            border_active: "#d4a366".to_string(), // primary

            // Accent colors
            primary: "#d4a366".to_string(),
            secondary: "#8fa5ae".to_string(), // blue

            // Semantic colors
            success: "#52c41a".to_string(),
            warning: "#faad14".to_string(),
            error: "#ff4d4f".to_string(),

            // UI-specific mappings
            selected_bg: "#393634".to_string(), // bg_element
            unread: "#d4a366".to_string(),      // primary (gold)
            urgent: "#ff3b30".to_string(),
            important: "#ff9500".to_string(),
            low: "#34c759".to_string(),
            categories: CategoryColors::default(),
        }
    }
}

impl Default for CategoryColors {
    fn default() -> Self {
        Self {
            housing: "#ff6b6b".to_string(),
            food: "#4ecdc4".to_string(),
            finance: "#45b7d1".to_string(),
            admin: "#96ceb4".to_string(),
            transportation: "#feca57".to_string(),
            internal: "#dda0dd".to_string(),
            general: "#a8a8a8".to_string(),
        }
    }
}

impl Config {
    /// Default location: `{config_dir}/triagetui/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("triagetui/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/triagetui/config.toml"))
    }

    /// Load from `path` (or the default location). Missing or broken files
    /// give the defaults.
    pub fn load(path: Option<&str>) -> Self {
        let config_path = match path {
            Some(p) => PathBuf::from(shellexpand::tilde(p).into_owned()),
            None => Self::default_path(),
        };

        if config_path.exists() {
            match Self::from_file(&config_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "config ignored"),
            }
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        }

        Self::default()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Routing table, falling back to the built-in one if the configured
    /// table sends a category to two departments
    pub fn router(&self) -> Router {
        match Router::new(self.routing.departments.clone()) {
            Ok(router) => router,
            Err(e) => {
                tracing::warn!(error = %e, "invalid routing table, using defaults");
                Router::default()
            }
        }
    }

    pub fn scheduler(&self) -> Scheduler {
        if self.priority.is_strictly_ordered() {
            Scheduler::new(self.priority)
        } else {
            tracing::warn!(weights = ?self.priority, "priority weights out of order, using defaults");
            Scheduler::default()
        }
    }

    pub fn view_controller(&self) -> ViewController {
        ViewController::new(self.router(), self.scheduler(), Aggregator::default())
    }
}

impl ThemeConfig {
    // Convenience methods for common colors
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn bg_element(&self) -> ratatui::style::Color {
        parse_color(&self.bg_element)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.border_subtle)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn warning(&self) -> ratatui::style::Color {
        parse_color(&self.warning)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
    pub fn unread(&self) -> ratatui::style::Color {
        parse_color(&self.unread)
    }

    pub fn priority(&self, priority: &Priority) -> ratatui::style::Color {
        match priority {
            Priority::Urgent => parse_color(&self.urgent),
            Priority::Important => parse_color(&self.important),
            Priority::Low => parse_color(&self.low),
            Priority::Other(_) => self.fg_muted(),
        }
    }

    pub fn category(&self, category: Category) -> ratatui::style::Color {
        let c = &self.categories;
        parse_color(match category {
            Category::Housing => &c.housing,
            Category::Food => &c.food,
            Category::Finance => &c.finance,
            Category::Admin => &c.admin,
            Category::Transportation => &c.transportation,
            Category::Internal => &c.internal,
            Category::General => &c.general,
        })
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 && s.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    // Named colors
    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}
