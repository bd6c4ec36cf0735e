use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => r#"<i class="fas fa-moon"></i>"#,
            Theme::Dark => r#"<i class="fas fa-sun"></i>"#,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                text: "#212529",
                surface: "#f8f9fa",
                grid: "#e9ecef",
                ticks: "#6c757d",
                border: "#dee2e6",
            },
            Theme::Dark => Palette {
                text: "#f8f9fa",
                surface: "#1e1e2d",
                grid: "#2b2b40",
                ticks: "#a1a5b7",
                border: "#3f4254",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub text: &'static str,
    pub surface: &'static str,
    pub grid: &'static str,
    pub ticks: &'static str,
    pub border: &'static str,
}
