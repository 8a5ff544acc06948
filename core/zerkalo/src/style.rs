use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ZerkaloError;

/// Outfit-style archetype a profile is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    /// Everyday comfort: jeans, basic tees, light jackets.
    Casual,
    /// Clean lines and neutral shades.
    Minimal,
    /// Urban wear with sport and vintage elements.
    Street,
    /// Restrained, office-ready elegance.
    Classic,
}

impl StyleCategory {
    /// Every category, in table order.
    pub const ALL: [StyleCategory; 4] = [
        StyleCategory::Casual,
        StyleCategory::Minimal,
        StyleCategory::Street,
        StyleCategory::Classic,
    ];

    /// Lowercase key used at string boundaries.
    pub fn key(self) -> &'static str {
        match self {
            StyleCategory::Casual => "casual",
            StyleCategory::Minimal => "minimal",
            StyleCategory::Street => "street",
            StyleCategory::Classic => "classic",
        }
    }
}

impl FromStr for StyleCategory {
    type Err = ZerkaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(StyleCategory::Casual),
            "minimal" => Ok(StyleCategory::Minimal),
            "street" => Ok(StyleCategory::Street),
            "classic" => Ok(StyleCategory::Classic),
            _ => Err(ZerkaloError::UnknownStyleCategory(s.to_string())),
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Skin-tone descriptor. Shown to the user, never used to pick a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneLabel {
    /// Light skin tone.
    Light,
    /// Medium skin tone.
    Medium,
    /// Dark skin tone.
    Dark,
}

impl ToneLabel {
    /// Every tone, in display order.
    pub const ALL: [ToneLabel; 3] = [ToneLabel::Light, ToneLabel::Medium, ToneLabel::Dark];

    /// Lowercase key used at string boundaries.
    pub fn key(self) -> &'static str {
        match self {
            ToneLabel::Light => "light",
            ToneLabel::Medium => "medium",
            ToneLabel::Dark => "dark",
        }
    }

    /// User-facing label.
    pub fn display_name(self) -> &'static str {
        match self {
            ToneLabel::Light => "светлый",
            ToneLabel::Medium => "средний",
            ToneLabel::Dark => "тёмный",
        }
    }
}

impl FromStr for ToneLabel {
    type Err = ZerkaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ToneLabel::Light),
            "medium" => Ok(ToneLabel::Medium),
            "dark" => Ok(ToneLabel::Dark),
            _ => Err(ZerkaloError::UnknownToneLabel(s.to_string())),
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A shopping suggestion: what to look for and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendedItem {
    /// Item name shown as the link text.
    pub name: &'static str,
    /// Retail search page, opened in a new browsing context.
    pub link: &'static str,
}

/// A resolved style suggestion for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    /// Category the template was taken from.
    pub style: StyleCategory,
    /// Tone the profile was resolved with.
    pub tone: ToneLabel,
    /// Headline, e.g. `Minimal — Чистота линий`.
    pub name: &'static str,
    /// Free-form description of the style.
    pub description: &'static str,
    /// Recommended items in display order.
    pub items: Vec<RecommendedItem>,
}

impl StyleProfile {
    /// Caption shown above the recommended items.
    pub fn tone_caption(&self) -> String {
        format!(
            "💡 Рекомендованные цвета для {} тона кожи",
            self.tone.display_name()
        )
    }
}

struct ProfileTemplate {
    name: &'static str,
    description: &'static str,
    items: [RecommendedItem; 3],
}

const CASUAL: ProfileTemplate = ProfileTemplate {
    name: "Casual — Повседневный комфорт",
    description: "Уютный и универсальный стиль для повседневных дел. Джинсы, базовые футболки, лёгкие куртки. Цвета: белый, серый, светло-синий, хаки.",
    items: [
        RecommendedItem {
            name: "Джинсы прямого кроя",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=джинсы прямого кроя",
        },
        RecommendedItem {
            name: "Футболка базовая хлопковая",
            link: "https://www.ozon.ru/search/?text=футболка базовая",
        },
        RecommendedItem {
            name: "Кроссовки белые",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=кроссовки белые",
        },
    ],
};

const MINIMAL: ProfileTemplate = ProfileTemplate {
    name: "Minimal — Чистота линий",
    description: "Минимализм — это лаконичные силуэты, нейтральные оттенки и дорогая простота. Белый, бежевый, чёрный и графит — твои союзники.",
    items: [
        RecommendedItem {
            name: "Пальто прямого кроя",
            link: "https://www.ozon.ru/search/?text=пальто минимализм",
        },
        RecommendedItem {
            name: "Водолазка однотонная",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=водолазка однотонная",
        },
        RecommendedItem {
            name: "Сумка-шоппер кожаная",
            link: "https://www.ozon.ru/search/?text=сумка шоппер кожаная",
        },
    ],
};

const STREET: ProfileTemplate = ProfileTemplate {
    name: "Street — Городской стиль",
    description: "Современный уличный стиль с элементами спортивного и винтажного. Худи, джоггеры, oversize-крои. Добавь бейсболку и массивные кроссовки.",
    items: [
        RecommendedItem {
            name: "Худи oversize",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=худи oversize",
        },
        RecommendedItem {
            name: "Джоггеры серые",
            link: "https://www.ozon.ru/search/?text=джоггеры",
        },
        RecommendedItem {
            name: "Бейсболка нейтральная",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=бейсболка",
        },
    ],
};

const CLASSIC: ProfileTemplate = ProfileTemplate {
    name: "Classic — Современная элегантность",
    description: "Подчёркнутая сдержанность, чистые формы и благородные ткани. Подходит для офиса и встреч. Бежевый, бордовый, синий, чёрный.",
    items: [
        RecommendedItem {
            name: "Пиджак классический",
            link: "https://www.ozon.ru/search/?text=пиджак женский классический",
        },
        RecommendedItem {
            name: "Юбка-карандаш",
            link: "https://www.wildberries.ru/catalog/0/search.aspx?search=юбка карандаш",
        },
        RecommendedItem {
            name: "Блузка шелковая",
            link: "https://www.ozon.ru/search/?text=шелковая блузка",
        },
    ],
};

fn template(style: StyleCategory) -> &'static ProfileTemplate {
    match style {
        StyleCategory::Casual => &CASUAL,
        StyleCategory::Minimal => &MINIMAL,
        StyleCategory::Street => &STREET,
        StyleCategory::Classic => &CLASSIC,
    }
}

/// Look up the template for `style` and attach `tone`.
///
/// The tone never influences which template is chosen.
pub fn resolve_profile(tone: ToneLabel, style: StyleCategory) -> StyleProfile {
    let template = template(style);
    StyleProfile {
        style,
        tone,
        name: template.name,
        description: template.description,
        items: template.items.to_vec(),
    }
}

/// [`resolve_profile`] for string keys such as `"dark"` and `"street"`.
pub fn resolve_profile_by_key(tone: &str, style: &str) -> Result<StyleProfile, ZerkaloError> {
    let style: StyleCategory = style.parse()?;
    let tone: ToneLabel = tone.parse()?;
    Ok(resolve_profile(tone, style))
}
