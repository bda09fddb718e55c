//! Internationalization (i18n) support
//!
//! Built-in month names and interface labels for a handful of languages,
//! plus optional per-site overrides loaded from `languages/<lang>.yml`.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Languages with built-in date conventions and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    De,
    Fr,
    Es,
    ZhCn,
}

impl Locale {
    /// Resolve a BCP 47 tag ("en-US", "de", "zh-CN"); unknown tags are English
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase().replace('_', "-");
        let primary = tag.split('-').next().unwrap_or("");
        match primary {
            "de" => Locale::De,
            "fr" => Locale::Fr,
            "es" => Locale::Es,
            "zh" => Locale::ZhCn,
            _ => Locale::En,
        }
    }

    /// Full month name, `month` in 1..=12
    pub fn month_name(self, month: u32) -> &'static str {
        let names: [&str; 12] = match self {
            Locale::En => [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
            Locale::De => [
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ],
            Locale::Fr => [
                "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
                "septembre", "octobre", "novembre", "décembre",
            ],
            Locale::Es => [
                "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
                "septiembre", "octubre", "noviembre", "diciembre",
            ],
            Locale::ZhCn => [
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ],
        };
        names[(month.clamp(1, 12) - 1) as usize]
    }

    /// Long-form date in this locale's word order
    pub fn long_date(self, year: i32, month: u32, day: u32) -> String {
        let m = self.month_name(month);
        match self {
            Locale::En => format!("{} {}, {}", m, day, year),
            Locale::De => format!("{}. {} {}", day, m, year),
            Locale::Fr => format!("{} {} {}", day, m, year),
            Locale::Es => format!("{} de {} de {}", day, m, year),
            Locale::ZhCn => format!("{}年{}{}日", year, m, day),
        }
    }

    fn labels(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => &[
                ("recent_articles", "Recent articles"),
                ("all_articles", "All articles"),
                ("tags", "Tags"),
                ("tagged", "Tagged"),
                ("newer", "Newer"),
                ("older", "Older"),
                ("toggle_theme", "Toggle theme"),
                ("menu", "Menu"),
                ("close", "Close"),
                ("draft", "Draft"),
                ("articles.one", "%d article"),
                ("articles.other", "%d articles"),
            ],
            Locale::De => &[
                ("recent_articles", "Neueste Artikel"),
                ("all_articles", "Alle Artikel"),
                ("tags", "Schlagwörter"),
                ("tagged", "Verschlagwortet mit"),
                ("newer", "Neuer"),
                ("older", "Älter"),
                ("toggle_theme", "Design wechseln"),
                ("menu", "Menü"),
                ("close", "Schließen"),
                ("draft", "Entwurf"),
                ("articles.one", "%d Artikel"),
                ("articles.other", "%d Artikel"),
            ],
            Locale::Fr => &[
                ("recent_articles", "Articles récents"),
                ("all_articles", "Tous les articles"),
                ("tags", "Étiquettes"),
                ("tagged", "Étiqueté"),
                ("newer", "Plus récent"),
                ("older", "Plus ancien"),
                ("toggle_theme", "Changer de thème"),
                ("menu", "Menu"),
                ("close", "Fermer"),
                ("draft", "Brouillon"),
                ("articles.one", "%d article"),
                ("articles.other", "%d articles"),
            ],
            Locale::Es => &[
                ("recent_articles", "Artículos recientes"),
                ("all_articles", "Todos los artículos"),
                ("tags", "Etiquetas"),
                ("tagged", "Etiquetado"),
                ("newer", "Más reciente"),
                ("older", "Más antiguo"),
                ("toggle_theme", "Cambiar tema"),
                ("menu", "Menú"),
                ("close", "Cerrar"),
                ("draft", "Borrador"),
                ("articles.one", "%d artículo"),
                ("articles.other", "%d artículos"),
            ],
            Locale::ZhCn => &[
                ("recent_articles", "最新文章"),
                ("all_articles", "全部文章"),
                ("tags", "标签"),
                ("tagged", "标签"),
                ("newer", "较新"),
                ("older", "较旧"),
                ("toggle_theme", "切换主题"),
                ("menu", "菜单"),
                ("close", "关闭"),
                ("draft", "草稿"),
                ("articles.one", "%d 篇文章"),
                ("articles.other", "%d 篇文章"),
            ],
        }
    }
}

/// Internationalization handler
pub struct I18n {
    locale: Locale,
    /// Site overrides: key -> translation
    overrides: HashMap<String, String>,
}

impl I18n {
    /// Create a new i18n handler
    pub fn new(language: &str) -> Self {
        Self {
            locale: Locale::from_tag(language),
            overrides: HashMap::new(),
        }
    }

    /// Load overrides for `language` from `<dir>/<language>.yml` if present
    pub fn load_overrides<P: AsRef<Path>>(&mut self, dir: P, language: &str) -> Result<()> {
        for ext in ["yml", "yaml"] {
            let path = dir.as_ref().join(format!("{}.{}", language, ext));
            if !path.exists() {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<HashMap<String, serde_yaml::Value>>(&content) {
                Ok(data) => {
                    for (key, value) in data {
                        if let Some(s) = yaml_value_to_string(&value) {
                            self.overrides.insert(key, s);
                        }
                    }
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
            break;
        }
        Ok(())
    }

    /// Current locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Get a translation by key; falls back to English, then to the key itself
    pub fn get(&self, key: &str) -> String {
        if let Some(value) = self.overrides.get(key) {
            return value.clone();
        }
        lookup(self.locale, key)
            .or_else(|| lookup(Locale::En, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a pluralized translation, substituting `%d`
    pub fn get_plural(&self, key: &str, count: usize) -> String {
        let plural_key = if count == 1 {
            format!("{}.one", key)
        } else {
            format!("{}.other", key)
        };
        self.get(&plural_key).replace("%d", &count.to_string())
    }

    /// Every label for template contexts
    pub fn labels(&self) -> HashMap<String, String> {
        let mut labels: HashMap<String, String> = Locale::En
            .labels()
            .iter()
            .map(|(k, _)| (k.to_string(), self.get(k)))
            .collect();
        for (key, value) in &self.overrides {
            labels.insert(key.clone(), value.clone());
        }
        labels
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    locale
        .labels()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

fn yaml_value_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag("de_AT"), Locale::De);
        assert_eq!(Locale::from_tag("zh-CN"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("pt-BR"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_long_date() {
        assert_eq!(Locale::En.long_date(2024, 1, 5), "January 5, 2024");
        assert_eq!(Locale::De.long_date(2024, 3, 5), "5. März 2024");
        assert_eq!(Locale::Es.long_date(2024, 1, 5), "5 de enero de 2024");
        assert_eq!(Locale::ZhCn.long_date(2024, 1, 5), "2024年1月5日");
    }

    #[test]
    fn test_get_and_plural() {
        let i18n = I18n::new("fr");
        assert_eq!(i18n.get("tags"), "Étiquettes");
        assert_eq!(i18n.get("missing.key"), "missing.key");
        assert_eq!(i18n.get_plural("articles", 1), "1 article");
        assert_eq!(i18n.get_plural("articles", 3), "3 articles");
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join("en.yml"),
            "recent_articles: Latest writing\nbroken: [1, 2]\n",
        )
        .unwrap();

        let mut i18n = I18n::new("en");
        i18n.load_overrides(dir.path(), "en").unwrap();
        assert_eq!(i18n.get("recent_articles"), "Latest writing");
        assert_eq!(i18n.labels()["recent_articles"], "Latest writing");
        assert_eq!(i18n.labels()["tags"], "Tags");
    }
}
