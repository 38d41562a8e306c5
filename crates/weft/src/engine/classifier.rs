//! CLDR plural classification, mapped onto predefined attribute ids.
//!
//! Different languages carve numbers into different plural categories -
//! English has "one" and "other", Russian has "one", "few", "many", and
//! "other", Arabic uses all six. The classifier wraps the icu plural rules
//! for one language and returns the matching predefined [`AttrId`], cardinal
//! ids 0..6 and ordinal ids 6..12.
//!
//! A classifier is locale data: it is built alongside a compiled store and
//! swapped as a unit on locale change, never mixed mid-evaluation.

use icu_locale_core::{Locale as IcuLocale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::AttrId;

/// Supported language codes for plural rule resolution.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

/// Per-locale plural classifier.
///
/// # Example
///
/// ```
/// use weft::{AttrId, Classifier};
///
/// let en = Classifier::new("en");
/// assert_eq!(en.cardinal(1), AttrId::ONE);
/// assert_eq!(en.cardinal(2), AttrId::OTHER);
/// assert_eq!(en.ordinal(2), AttrId::ORD_TWO);
///
/// let ru = Classifier::new("ru");
/// assert_eq!(ru.cardinal(2), AttrId::FEW);
/// assert_eq!(ru.cardinal(5), AttrId::MANY);
/// ```
pub struct Classifier {
    language: &'static str,
    cardinal: PluralRules,
    ordinal: PluralRules,
}

impl Classifier {
    /// Build the classifier for a language code. Unrecognized codes fall
    /// back to English rules.
    pub fn new(language: &str) -> Classifier {
        let language = normalize_lang(language);
        let loc = build_locale(language);
        let cardinal = PluralRules::try_new(loc.clone().into(), PluralRuleType::Cardinal.into())
            .expect("locale should be supported");
        let ordinal = PluralRules::try_new(loc.into(), PluralRuleType::Ordinal.into())
            .expect("locale should be supported");
        Classifier {
            language,
            cardinal,
            ordinal,
        }
    }

    /// The normalized language code this classifier was built for.
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// The cardinal plural category of a quantity, as an attribute id.
    pub fn cardinal(&self, n: i64) -> AttrId {
        cardinal_attr(self.cardinal.category_for(n))
    }

    /// The ordinal category of an integer, as an attribute id.
    pub fn ordinal(&self, n: i64) -> AttrId {
        ordinal_attr(self.ordinal.category_for(n))
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Normalize a language code to a supported static string reference.
///
/// Region subtags are stripped ("pt-BR" resolves as "pt") and matching is
/// case-insensitive. Unrecognized codes resolve to "en".
fn normalize_lang(lang: &str) -> &'static str {
    let primary = lang
        .split(['-', '_'])
        .next()
        .unwrap_or(lang)
        .to_ascii_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code == primary)
        .copied()
        .unwrap_or("en")
}

/// Build an icu `Locale` for a normalized language code.
fn build_locale(lang: &'static str) -> IcuLocale {
    match lang {
        "en" => locale!("en"),
        "ru" => locale!("ru"),
        "ar" => locale!("ar"),
        "de" => locale!("de"),
        "es" => locale!("es"),
        "fr" => locale!("fr"),
        "it" => locale!("it"),
        "pt" => locale!("pt"),
        "ja" => locale!("ja"),
        "zh" => locale!("zh"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "th" => locale!("th"),
        "id" => locale!("id"),
        "el" => locale!("el"),
        "ro" => locale!("ro"),
        "fa" => locale!("fa"),
        "bn" => locale!("bn"),
        "hi" => locale!("hi"),
        "he" => locale!("he"),
        _ => locale!("en"),
    }
}

/// Translate a cardinal `PluralCategory` to its attribute id.
fn cardinal_attr(category: PluralCategory) -> AttrId {
    match category {
        PluralCategory::Zero => AttrId::ZERO,
        PluralCategory::One => AttrId::ONE,
        PluralCategory::Two => AttrId::TWO,
        PluralCategory::Few => AttrId::FEW,
        PluralCategory::Many => AttrId::MANY,
        PluralCategory::Other => AttrId::OTHER,
    }
}

/// Translate an ordinal `PluralCategory` to its attribute id.
fn ordinal_attr(category: PluralCategory) -> AttrId {
    match category {
        PluralCategory::Zero => AttrId::ORD_ZERO,
        PluralCategory::One => AttrId::ORD_ONE,
        PluralCategory::Two => AttrId::ORD_TWO,
        PluralCategory::Few => AttrId::ORD_FEW,
        PluralCategory::Many => AttrId::ORD_MANY,
        PluralCategory::Other => AttrId::ORD_OTHER,
    }
}
