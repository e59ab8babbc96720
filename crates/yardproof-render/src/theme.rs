use std::str::FromStr;

/// Fill palette for the footprint box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillTheme {
    Princess,
    Sports,
    Character,
    Standard,
}

const PRINCESS_WORDS: &[&str] = &["princess", "frozen", "pink"];
const SPORTS_WORDS: &[&str] = &["sport", "football"];
const CHARACTER_WORDS: &[&str] = &["dora", "elmo", "shark", "spongebob", "mario", "avengers"];

impl FillTheme {
    /// Infers the palette from a product name; earlier families win.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let hit = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if hit(PRINCESS_WORDS) {
            Self::Princess
        } else if hit(SPORTS_WORDS) {
            Self::Sports
        } else if hit(CHARACTER_WORDS) {
            Self::Character
        } else {
            Self::Standard
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "princess" => Some(Self::Princess),
            "sports" => Some(Self::Sports),
            "character" => Some(Self::Character),
            "standard" => Some(Self::Standard),
            _ => None,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Princess => "#E75480",
            Self::Sports => "#228B22",
            Self::Character => "#FFB347",
            Self::Standard => "#3b6ea8",
        }
    }
}

/// Where the renderer takes the fill palette from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeSource {
    /// Keyword inference on the product name; the spec's `theme` is ignored.
    #[default]
    Name,
    /// A recognised, non-`standard` spec `theme` wins; otherwise fall back to the name.
    Spec,
}

impl FromStr for ThemeSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "spec" => Ok(Self::Spec),
            _ => Err(()),
        }
    }
}

impl ThemeSource {
    pub fn resolve(self, name: &str, spec_theme: &str) -> FillTheme {
        match self {
            Self::Name => FillTheme::from_name(name),
            Self::Spec => FillTheme::from_key(spec_theme)
                .filter(|t| *t != FillTheme::Standard)
                .unwrap_or_else(|| FillTheme::from_name(name)),
        }
    }
}
